//! Automatic screen tracking from navigation container state.
//!
//! Navigation libraries report their state as a tree of
//! `{ index, routes: [{ name, params, state? }] }` nodes. The focused screen is
//! the route at `index`, descended through nested `state` until a leaf.

use serde_json::Value;

use sessioncam_core::types::RawProperties;
use sessioncam_core::ScreenViewRequest;

use crate::adapter::BridgeAdapter;
use crate::outcome::Outcome;

/// Resolve the innermost focused route of a navigation state.
pub fn focused_route(state: &Value) -> Option<&Value> {
    if state.is_null() {
        return None;
    }
    match (state.get("index"), state.get("routes")) {
        (Some(index), Some(Value::Array(routes))) => {
            let route = routes.get(usize::try_from(index.as_u64()?).ok()?)?;
            match route.get("state") {
                Some(nested) if !nested.is_null() => focused_route(nested),
                _ => Some(route),
            }
        }
        _ => Some(state),
    }
}

/// Build the screen view for the focused route, if it has a name.
pub fn screen_view_for(state: &Value) -> Option<ScreenViewRequest> {
    let route = focused_route(state)?;
    let name = route.get("name")?.as_str()?;

    let mut properties = RawProperties::new();
    if let Some(params) = route.get("params").filter(|p| !p.is_null()) {
        properties.insert("route_params".into(), params.clone());
    }
    properties.insert("auto_tracked".into(), Value::Bool(true));

    Some(ScreenViewRequest::new(name).with_properties(properties))
}

impl BridgeAdapter {
    /// Track the focused screen of a navigation state change. Resolves to
    /// `false` when the state names no screen.
    pub async fn track_navigation_state(&self, state: &Value) -> Outcome<bool> {
        match screen_view_for(state) {
            Some(request) => self.track_screen_view(&request).await,
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_focused_route() {
        let state = json!({
            "index": 1,
            "routes": [
                { "name": "Home" },
                {
                    "name": "Shop",
                    "state": {
                        "index": 0,
                        "routes": [{ "name": "Product", "params": { "sku": "A1" } }]
                    }
                }
            ]
        });
        let route = focused_route(&state).unwrap();
        assert_eq!(route["name"], "Product");
    }

    #[test]
    fn test_screen_view_properties() {
        let state = json!({
            "index": 0,
            "routes": [{ "name": "Product", "params": { "sku": "A1" } }]
        });
        let request = screen_view_for(&state).unwrap();
        assert_eq!(request.screen_name.as_deref(), Some("Product"));

        let props = request.properties.unwrap();
        assert_eq!(props["route_params"], json!({ "sku": "A1" }));
        assert_eq!(props["auto_tracked"], json!(true));
    }

    #[test]
    fn test_params_omitted_when_absent() {
        let state = json!({ "index": 0, "routes": [{ "name": "Home", "params": null }] });
        let props = screen_view_for(&state).unwrap().properties.unwrap();
        assert!(!props.contains_key("route_params"));
    }

    #[test]
    fn test_unresolvable_states() {
        assert!(focused_route(&Value::Null).is_none());
        assert!(screen_view_for(&json!({ "index": 3, "routes": [] })).is_none());
        assert!(screen_view_for(&json!({ "index": 0, "routes": [{ "key": "x" }] })).is_none());
    }

    #[test]
    fn test_leaf_state_is_its_own_route() {
        let state = json!({ "name": "Settings" });
        assert_eq!(screen_view_for(&state).unwrap().screen_name.as_deref(), Some("Settings"));
    }
}
