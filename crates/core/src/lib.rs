//! Shared types for the SessionCam mobile bridge: request shapes, the typed
//! property model, the rejection taxonomy and operator configuration.

pub mod config;
pub mod error;
pub mod properties;
pub mod types;

pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult, ErrorCode, SdkError};
pub use properties::{PropertyValue, Properties};
pub use types::{
    ActivityContext, AppContext, EventRequest, InitConfig, ScreenViewRequest, SdkConfig,
    SdkPlatform, UserPropertiesRequest,
};
