//! Method channel: name-based dispatch of bridge calls.
//!
//! Cross-platform runtimes deliver calls as a method name plus a loosely typed
//! argument object. [`BridgeChannel`] decodes the arguments into the request
//! shapes, runs the matching adapter operation and returns a serializable
//! [`ChannelReply`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

use sessioncam_core::types::RawProperties;
use sessioncam_core::{
    ActivityContext, ErrorCode, EventRequest, InitConfig, ScreenViewRequest, UserPropertiesRequest,
};

use crate::adapter::BridgeAdapter;
use crate::outcome::{BridgeFailure, Outcome, OutcomeExt};

/// Method names understood by [`BridgeChannel::dispatch`].
pub const METHODS: &[&str] = &[
    "initialize",
    "getSessionId",
    "trackScreenView",
    "trackEvent",
    "setUserProperties",
    "startRecording",
    "stopRecording",
    "endSession",
    "restartSession",
    "trackButtonClick",
    "logNetworkRequest",
    "logError",
    "trackNavigationState",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelReply {
    Success { value: Value },
    Error { code: ErrorCode, message: String },
    NotImplemented { method: String },
    /// The call itself could not be read, so no method was run.
    InvalidCall { message: String },
}

impl ChannelReply {
    pub fn is_success(&self) -> bool {
        matches!(self, ChannelReply::Success { .. })
    }
}

impl From<BridgeFailure> for ChannelReply {
    fn from(failure: BridgeFailure) -> Self {
        ChannelReply::Error {
            code: failure.code,
            message: failure.message,
        }
    }
}

impl<T: Into<Value>> From<Outcome<T>> for ChannelReply {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Ok(value) => ChannelReply::Success {
                value: value.into(),
            },
            Err(failure) => failure.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ButtonClickArgs {
    button_id: String,
    properties: Option<RawProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkRequestArgs {
    url: String,
    method: String,
    status_code: Option<u16>,
    #[serde(alias = "durationMs")]
    duration: Option<Number>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorArgs {
    error: String,
    stack_trace: Option<String>,
    properties: Option<RawProperties>,
}

pub struct BridgeChannel {
    adapter: BridgeAdapter,
    activity: Option<ActivityContext>,
}

impl BridgeChannel {
    pub fn new(adapter: BridgeAdapter) -> Self {
        Self {
            adapter,
            activity: None,
        }
    }

    /// Wire the foreground activity used by `startRecording`.
    pub fn with_activity(mut self, activity: ActivityContext) -> Self {
        self.activity = Some(activity);
        self
    }

    pub async fn dispatch(&self, call: MethodCall) -> ChannelReply {
        debug!(method = %call.method, "dispatching channel call");
        let adapter = &self.adapter;
        let args = call.arguments;

        match call.method.as_str() {
            "initialize" => match decode::<InitConfig>(args, "initialize", ErrorCode::InitError) {
                Ok(config) => adapter.initialize(&config).await.into(),
                Err(failure) => failure.into(),
            },
            "getSessionId" => adapter.get_session_id().await.into(),
            "trackScreenView" => {
                match decode::<ScreenViewRequest>(args, "track_screen_view", ErrorCode::TrackError) {
                    Ok(request) => adapter.track_screen_view(&request).await.into(),
                    Err(failure) => failure.into(),
                }
            }
            "trackEvent" => match decode::<EventRequest>(args, "track_event", ErrorCode::TrackError) {
                Ok(request) => adapter.track_event(&request).await.into(),
                Err(failure) => failure.into(),
            },
            "setUserProperties" => match decode::<UserPropertiesRequest>(
                args,
                "set_user_properties",
                ErrorCode::SetUserError,
            ) {
                Ok(request) => adapter.set_user_properties(&request).await.into(),
                Err(failure) => failure.into(),
            },
            "startRecording" => adapter.start_recording(self.activity.as_ref()).await.into(),
            "stopRecording" => adapter.stop_recording().await.into(),
            "endSession" => adapter.end_session().await.into(),
            "restartSession" => adapter.restart_session().await.into(),
            "trackButtonClick" => {
                match decode::<ButtonClickArgs>(args, "track_button_click", ErrorCode::TrackError) {
                    Ok(a) => adapter
                        .track_button_click(&a.button_id, a.properties)
                        .await
                        .into(),
                    Err(failure) => failure.into(),
                }
            }
            "logNetworkRequest" => match decode::<NetworkRequestArgs>(
                args,
                "log_network_request",
                ErrorCode::TrackError,
            ) {
                Ok(a) => adapter
                    .log_network_request(&a.url, &a.method, a.status_code, a.duration)
                    .await
                    .into(),
                Err(failure) => failure.into(),
            },
            "logError" => match decode::<ErrorArgs>(args, "log_error", ErrorCode::TrackError) {
                Ok(a) => adapter
                    .log_error(&a.error, a.stack_trace.as_deref(), a.properties)
                    .await
                    .into(),
                Err(failure) => failure.into(),
            },
            "trackNavigationState" => adapter.track_navigation_state(&args).await.into(),
            other => ChannelReply::NotImplemented {
                method: other.to_string(),
            },
        }
    }
}

/// Decode call arguments. A missing argument object reads as `{}` so that
/// required fields are reported by name.
fn decode<T: DeserializeOwned>(
    args: Value,
    operation: &'static str,
    code: ErrorCode,
) -> Outcome<T> {
    let args = if args.is_null() {
        Value::Object(RawProperties::new())
    } else {
        args
    };
    serde_json::from_value(args).or_reject(operation, code)
}
