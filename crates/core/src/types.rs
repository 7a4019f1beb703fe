//! Request shapes received from the application layer and the values the
//! bridge hands to the native SDK.

use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};

/// Generic property object as delivered by the application runtime.
pub type RawProperties = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SdkPlatform {
    Ios,
    Android,
    ReactNative,
    Flutter,
}

/// Application-level context handed to the SDK on initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
    pub platform: SdkPlatform,
    pub app_id: String,
    pub app_version: String,
}

/// Foreground execution context. Starting a video recording may prompt for
/// screen-capture permission, which needs a visible activity to attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityContext {
    pub name: String,
}

impl ActivityContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitConfig {
    pub sdk_key: Option<String>,
    pub api_url: Option<String>,
    pub enable_video_recording: Option<bool>,
    pub enable_event_tracking: Option<bool>,
    pub enable_automatic_tracking: Option<bool>,
}

impl InitConfig {
    pub fn with_key(sdk_key: impl Into<String>) -> Self {
        Self {
            sdk_key: Some(sdk_key.into()),
            ..Default::default()
        }
    }

    /// Resolve into the configuration forwarded to the SDK, filling absent
    /// fields from the operator defaults.
    pub fn resolve(&self, defaults: &BridgeConfig) -> BridgeResult<SdkConfig> {
        let sdk_key = required(self.sdk_key.as_deref(), "sdkKey")?;
        Ok(SdkConfig {
            sdk_key,
            api_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| defaults.default_api_url.clone()),
            enable_video_recording: self
                .enable_video_recording
                .unwrap_or(defaults.enable_video_recording),
            enable_event_tracking: self
                .enable_event_tracking
                .unwrap_or(defaults.enable_event_tracking),
            enable_automatic_tracking: self
                .enable_automatic_tracking
                .unwrap_or(defaults.enable_automatic_tracking),
        })
    }
}

/// Fully resolved SDK configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    pub sdk_key: String,
    pub api_url: String,
    pub enable_video_recording: bool,
    pub enable_event_tracking: bool,
    pub enable_automatic_tracking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenViewRequest {
    pub screen_name: Option<String>,
    pub properties: Option<RawProperties>,
}

impl ScreenViewRequest {
    pub fn new(screen_name: impl Into<String>) -> Self {
        Self {
            screen_name: Some(screen_name.into()),
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: RawProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn screen_name(&self) -> BridgeResult<String> {
        required(self.screen_name.as_deref(), "screenName")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub event_name: Option<String>,
    pub properties: Option<RawProperties>,
}

impl EventRequest {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: Some(event_name.into()),
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: RawProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn event_name(&self) -> BridgeResult<String> {
        required(self.event_name.as_deref(), "eventName")
    }
}

/// `userId` is optional; the React Native and Flutter layers send it as
/// `user_id`, so both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPropertiesRequest {
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
    pub properties: Option<RawProperties>,
}

fn required(value: Option<&str>, field: &'static str) -> BridgeResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(BridgeError::MissingField { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_applies_defaults() {
        let defaults = BridgeConfig::default();
        let resolved = InitConfig::with_key("key-1").resolve(&defaults).unwrap();
        assert_eq!(
            resolved,
            SdkConfig {
                sdk_key: "key-1".into(),
                api_url: defaults.default_api_url.clone(),
                enable_video_recording: true,
                enable_event_tracking: true,
                enable_automatic_tracking: true,
            }
        );
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let config = InitConfig {
            sdk_key: Some("key-2".into()),
            api_url: Some("https://self-hosted.example".into()),
            enable_video_recording: Some(false),
            enable_event_tracking: None,
            enable_automatic_tracking: Some(false),
        };
        let resolved = config.resolve(&BridgeConfig::default()).unwrap();
        assert_eq!(resolved.api_url, "https://self-hosted.example");
        assert!(!resolved.enable_video_recording);
        assert!(resolved.enable_event_tracking);
        assert!(!resolved.enable_automatic_tracking);
    }

    #[test]
    fn test_resolve_requires_sdk_key() {
        let err = InitConfig::default()
            .resolve(&BridgeConfig::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingField { field: "sdkKey" }));

        let empty = InitConfig::with_key("");
        assert!(empty.resolve(&BridgeConfig::default()).is_err());
    }

    #[test]
    fn test_init_config_wire_names() {
        let config: InitConfig = serde_json::from_value(json!({
            "sdkKey": "abc",
            "enableVideoRecording": false
        }))
        .unwrap();
        assert_eq!(config.sdk_key.as_deref(), Some("abc"));
        assert_eq!(config.enable_video_recording, Some(false));
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn test_user_properties_accepts_both_spellings() {
        let snake: UserPropertiesRequest =
            serde_json::from_value(json!({ "user_id": "u-1" })).unwrap();
        let camel: UserPropertiesRequest =
            serde_json::from_value(json!({ "userId": "u-1" })).unwrap();
        assert_eq!(snake.user_id.as_deref(), Some("u-1"));
        assert_eq!(camel, snake);
    }

    #[test]
    fn test_event_name_required() {
        let req = EventRequest::default();
        assert!(matches!(
            req.event_name(),
            Err(BridgeError::MissingField { field: "eventName" })
        ));
        assert_eq!(EventRequest::new("purchase").event_name().unwrap(), "purchase");
    }
}
