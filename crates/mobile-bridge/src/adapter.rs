//! Bridge adapter: exposes the native SDK to the application layer as a fixed
//! set of asynchronous calls, each returning an [`Outcome`].
//!
//! Every call validates its request, forwards once to the SDK and converts any
//! failure into a [`BridgeFailure`](crate::outcome::BridgeFailure) carrying
//! the operation's code. The adapter keeps no session or recording state;
//! that all lives behind the SDK handle.

use std::sync::Arc;

use serde_json::Number;
use tracing::debug;

use sessioncam_core::properties::convert_optional;
use sessioncam_core::types::RawProperties;
use sessioncam_core::{
    ActivityContext, AppContext, BridgeConfig, BridgeError, ErrorCode, EventRequest, InitConfig,
    ScreenViewRequest, UserPropertiesRequest,
};

use crate::outcome::{Outcome, OutcomeExt};
use crate::sdk::SessionSdk;

pub struct BridgeAdapter {
    sdk: Arc<dyn SessionSdk>,
    app_context: Option<AppContext>,
    defaults: BridgeConfig,
}

impl BridgeAdapter {
    pub fn new(sdk: Arc<dyn SessionSdk>, app_context: Option<AppContext>) -> Self {
        Self {
            sdk,
            app_context,
            defaults: BridgeConfig::default(),
        }
    }

    /// Use operator-configured defaults for fields omitted from `initialize`.
    pub fn with_defaults(mut self, defaults: BridgeConfig) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn initialize(&self, config: &InitConfig) -> Outcome<bool> {
        const OP: &str = "initialize";
        count_call(OP);

        let sdk_config = config.resolve(&self.defaults).or_reject(OP, ErrorCode::InitError)?;
        let context = self
            .app_context
            .as_ref()
            .ok_or(BridgeError::ContextUnavailable)
            .or_reject(OP, ErrorCode::InitError)?;

        debug!(
            api_url = %sdk_config.api_url,
            video = sdk_config.enable_video_recording,
            events = sdk_config.enable_event_tracking,
            automatic = sdk_config.enable_automatic_tracking,
            "forwarding sdk initialize"
        );
        self.sdk
            .initialize(context, sdk_config)
            .await
            .or_reject(OP, ErrorCode::InitError)?;
        Ok(true)
    }

    pub async fn get_session_id(&self) -> Outcome<String> {
        const OP: &str = "get_session_id";
        count_call(OP);
        self.sdk
            .session_id()
            .await
            .or_reject(OP, ErrorCode::GetSessionError)
    }

    pub async fn track_screen_view(&self, request: &ScreenViewRequest) -> Outcome<bool> {
        const OP: &str = "track_screen_view";
        count_call(OP);

        let screen_name = request.screen_name().or_reject(OP, ErrorCode::TrackError)?;
        let properties =
            convert_optional(request.properties.as_ref()).or_reject(OP, ErrorCode::TrackError)?;

        debug!(screen = %screen_name, properties = properties.len(), "forwarding page view");
        self.sdk
            .track_page_view(&screen_name, properties)
            .await
            .or_reject(OP, ErrorCode::TrackError)?;
        Ok(true)
    }

    pub async fn track_event(&self, request: &EventRequest) -> Outcome<bool> {
        const OP: &str = "track_event";
        count_call(OP);

        let event_name = request.event_name().or_reject(OP, ErrorCode::TrackError)?;
        let properties =
            convert_optional(request.properties.as_ref()).or_reject(OP, ErrorCode::TrackError)?;

        debug!(event = %event_name, properties = properties.len(), "forwarding event");
        self.sdk
            .track_event(&event_name, properties)
            .await
            .or_reject(OP, ErrorCode::TrackError)?;
        Ok(true)
    }

    pub async fn set_user_properties(&self, request: &UserPropertiesRequest) -> Outcome<bool> {
        const OP: &str = "set_user_properties";
        count_call(OP);

        let properties = convert_optional(request.properties.as_ref())
            .or_reject(OP, ErrorCode::SetUserError)?;

        debug!(
            has_user_id = request.user_id.is_some(),
            properties = properties.len(),
            "forwarding user properties"
        );
        self.sdk
            .set_user_properties(request.user_id.as_deref(), properties)
            .await
            .or_reject(OP, ErrorCode::SetUserError)?;
        Ok(true)
    }

    /// Start video recording. Without an activity context no permission
    /// prompt can be shown, so the call resolves to `false` and the SDK is
    /// left untouched.
    pub async fn start_recording(&self, activity: Option<&ActivityContext>) -> Outcome<bool> {
        const OP: &str = "start_recording";
        count_call(OP);

        let Some(activity) = activity else {
            debug!("no activity context, recording not started");
            return Ok(false);
        };
        self.sdk
            .start_video_recording(activity)
            .await
            .or_reject(OP, ErrorCode::RecordingError)?;
        Ok(true)
    }

    pub async fn stop_recording(&self) -> Outcome<bool> {
        const OP: &str = "stop_recording";
        count_call(OP);
        self.sdk
            .stop_video_recording()
            .await
            .or_reject(OP, ErrorCode::RecordingError)?;
        Ok(true)
    }

    pub async fn end_session(&self) -> Outcome<bool> {
        const OP: &str = "end_session";
        count_call(OP);
        self.sdk
            .end_session()
            .await
            .or_reject(OP, ErrorCode::SessionError)?;
        Ok(true)
    }

    pub async fn restart_session(&self) -> Outcome<bool> {
        const OP: &str = "restart_session";
        count_call(OP);
        self.sdk
            .restart_session()
            .await
            .or_reject(OP, ErrorCode::SessionError)?;
        Ok(true)
    }

    // ─── Convenience events ─────────────────────────────────────────────────

    /// Track a tap on `button_id` as a `button_click` event.
    pub async fn track_button_click(
        &self,
        button_id: &str,
        properties: Option<RawProperties>,
    ) -> Outcome<bool> {
        let mut props = RawProperties::new();
        props.insert("button_id".into(), button_id.into());
        props.extend(properties.unwrap_or_default());
        self.track_event(&EventRequest::new("button_click").with_properties(props))
            .await
    }

    /// Report an outbound request as a `network_request` event. `duration` is
    /// forwarded as given, integral or fractional.
    pub async fn log_network_request(
        &self,
        url: &str,
        method: &str,
        status_code: Option<u16>,
        duration: Option<Number>,
    ) -> Outcome<bool> {
        let mut props = RawProperties::new();
        props.insert("url".into(), url.into());
        props.insert("method".into(), method.into());
        if let Some(status) = status_code {
            props.insert("status_code".into(), status.into());
        }
        if let Some(duration) = duration {
            props.insert("duration".into(), duration.into());
        }
        self.track_event(&EventRequest::new("network_request").with_properties(props))
            .await
    }

    /// Report an application error as an `error` event. Caller properties are
    /// applied last.
    pub async fn log_error(
        &self,
        error: &str,
        stack_trace: Option<&str>,
        properties: Option<RawProperties>,
    ) -> Outcome<bool> {
        let mut props = RawProperties::new();
        props.insert("error".into(), error.into());
        if let Some(trace) = stack_trace {
            props.insert("stack_trace".into(), trace.into());
        }
        props.extend(properties.unwrap_or_default());
        self.track_event(&EventRequest::new("error").with_properties(props))
            .await
    }
}

fn count_call(operation: &'static str) {
    metrics::counter!("bridge.calls", "operation" => operation).increment(1);
}
