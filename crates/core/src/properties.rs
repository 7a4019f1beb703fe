//! Typed property model and the conversion from the generic property objects
//! the application runtime sends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::types::RawProperties;

/// Maximum nesting of lists and maps inside a property object.
pub const MAX_PROPERTY_DEPTH: usize = 16;

pub type Properties = BTreeMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

/// Convert an optional property object. Absent properties become an empty map.
pub fn convert_optional(raw: Option<&RawProperties>) -> BridgeResult<Properties> {
    match raw {
        Some(map) => convert_properties(map),
        None => Ok(Properties::new()),
    }
}

/// Recursively convert a property object into typed values.
///
/// Values with no typed counterpart (`null`, integers beyond `i64`, nesting
/// past [`MAX_PROPERTY_DEPTH`]) are rejected with the offending key path.
pub fn convert_properties(raw: &RawProperties) -> BridgeResult<Properties> {
    convert_map(raw, "", 0)
}

fn convert_map(raw: &RawProperties, prefix: &str, depth: usize) -> BridgeResult<Properties> {
    raw.iter()
        .map(|(key, value)| {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            convert_value(value, &path, depth).map(|v| (key.clone(), v))
        })
        .collect()
}

fn convert_value(value: &Value, path: &str, depth: usize) -> BridgeResult<PropertyValue> {
    match value {
        Value::Null => Err(unsupported(path, "null values are not supported")),
        Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
        Value::String(s) => Ok(PropertyValue::String(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(PropertyValue::Int(i))
            } else if n.is_u64() {
                Err(unsupported(path, "integer exceeds 64-bit signed range"))
            } else {
                n.as_f64()
                    .map(PropertyValue::Float)
                    .ok_or_else(|| unsupported(path, "number is not representable"))
            }
        }
        Value::Array(items) => {
            check_depth(path, depth)?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| convert_value(item, &format!("{path}[{i}]"), depth + 1))
                .collect::<BridgeResult<Vec<_>>>()
                .map(PropertyValue::List)
        }
        Value::Object(map) => {
            check_depth(path, depth)?;
            convert_map(map, path, depth + 1).map(PropertyValue::Map)
        }
    }
}

fn check_depth(path: &str, depth: usize) -> BridgeResult<()> {
    if depth >= MAX_PROPERTY_DEPTH {
        return Err(unsupported(
            path,
            &format!("nesting deeper than {MAX_PROPERTY_DEPTH} levels"),
        ));
    }
    Ok(())
}

fn unsupported(path: &str, reason: &str) -> BridgeError {
    BridgeError::UnsupportedProperty {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> RawProperties {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_scalars() {
        let props = convert_properties(&object(json!({
            "sku": "A1",
            "qty": 3,
            "price": 19.5,
            "gift": false,
            "delta": -7
        })))
        .unwrap();

        assert_eq!(props["sku"], PropertyValue::from("A1"));
        assert_eq!(props["qty"], PropertyValue::Int(3));
        assert_eq!(props["price"], PropertyValue::Float(19.5));
        assert_eq!(props["gift"], PropertyValue::Bool(false));
        assert_eq!(props["delta"], PropertyValue::Int(-7));
    }

    #[test]
    fn test_nested_lists_and_maps() {
        let props = convert_properties(&object(json!({
            "cart": {
                "items": [{ "sku": "A1" }, { "sku": "B2" }],
                "total": 42
            }
        })))
        .unwrap();

        let PropertyValue::Map(cart) = &props["cart"] else {
            panic!("cart should be a map");
        };
        let PropertyValue::List(items) = &cart["items"] else {
            panic!("items should be a list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(cart["total"], PropertyValue::Int(42));
    }

    #[test]
    fn test_null_is_rejected_with_path() {
        let err = convert_properties(&object(json!({
            "route": { "params": [1, null] }
        })))
        .unwrap_err();

        match err {
            BridgeError::UnsupportedProperty { path, .. } => {
                assert_eq!(path, "route.params[1]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_unsigned_is_rejected() {
        let err = convert_properties(&object(json!({ "id": u64::MAX }))).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedProperty { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let mut value = json!("leaf");
        for _ in 0..=MAX_PROPERTY_DEPTH {
            value = json!({ "n": value });
        }
        assert!(convert_properties(&object(json!({ "deep": value }))).is_err());

        let mut shallow = json!("leaf");
        for _ in 0..MAX_PROPERTY_DEPTH {
            shallow = json!({ "n": shallow });
        }
        assert!(convert_properties(&object(json!({ "ok": shallow }))).is_ok());
    }

    #[test]
    fn test_absent_properties_are_empty() {
        assert!(convert_optional(None).unwrap().is_empty());
    }
}
