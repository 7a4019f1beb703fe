use serde::Deserialize;

/// Operator configuration for the bridge. Loaded from environment variables
/// with the prefix `SESSIONCAM__`.
///
/// The endpoint and feature flags here are the values applied when an
/// application omits them from its init call.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_api_url")]
    pub default_api_url: String,
    #[serde(default = "default_enabled")]
    pub enable_video_recording: bool,
    #[serde(default = "default_enabled")]
    pub enable_event_tracking: bool,
    #[serde(default = "default_enabled")]
    pub enable_automatic_tracking: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

pub const DEFAULT_API_URL: &str = "https://api.sessioncam.io";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_enabled() -> bool {
    true
}
fn default_log_filter() -> String {
    "sessioncam_bridge=info,sessioncam_mobile_bridge=info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_api_url: default_api_url(),
            enable_video_recording: default_enabled(),
            enable_event_tracking: default_enabled(),
            enable_automatic_tracking: default_enabled(),
            log_filter: default_log_filter(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::with_prefix("SESSIONCAM")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_source(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("SESSIONCAM")
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BridgeConfig::from_source(env_source(&[])).unwrap();
        assert_eq!(config.default_api_url, DEFAULT_API_URL);
        assert!(config.enable_video_recording);
        assert!(config.enable_event_tracking);
        assert!(config.enable_automatic_tracking);
    }

    #[test]
    fn test_env_overrides() {
        let config = BridgeConfig::from_source(env_source(&[
            ("SESSIONCAM__DEFAULT_API_URL", "https://collector.internal"),
            ("SESSIONCAM__ENABLE_VIDEO_RECORDING", "false"),
        ]))
        .unwrap();
        assert_eq!(config.default_api_url, "https://collector.internal");
        assert!(!config.enable_video_recording);
        assert!(config.enable_event_tracking);
    }
}
