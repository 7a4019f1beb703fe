//! In-memory SDK that records every call, for tests and local wiring checks.

use async_trait::async_trait;
use parking_lot::Mutex;

use sessioncam_core::{ActivityContext, AppContext, Properties, SdkConfig, SdkError};

use crate::sdk::{SdkResult, SessionSdk};

#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
    Initialize {
        context: AppContext,
        config: SdkConfig,
    },
    SessionId,
    TrackPageView {
        name: String,
        properties: Properties,
    },
    TrackEvent {
        name: String,
        properties: Properties,
    },
    SetUserProperties {
        user_id: Option<String>,
        properties: Properties,
    },
    StartVideoRecording {
        activity: String,
    },
    StopVideoRecording,
    EndSession,
    RestartSession,
}

#[derive(Default)]
struct State {
    calls: Vec<SdkCall>,
    session_id: Option<String>,
    sessions_started: u32,
    failure: Option<String>,
}

/// Fake SDK. Initialization starts `session-1`, each restart starts the next
/// numbered session, and ending a session leaves none active.
#[derive(Default)]
pub struct RecordingSdk {
    state: Mutex<State>,
}

impl RecordingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// An SDK with an already active session.
    pub fn with_session(session_id: impl Into<String>) -> Self {
        let sdk = Self::new();
        {
            let mut state = sdk.state.lock();
            state.session_id = Some(session_id.into());
            state.sessions_started = 1;
        }
        sdk
    }

    /// An SDK whose every call raises `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let sdk = Self::new();
        sdk.state.lock().failure = Some(message.into());
        sdk
    }

    pub fn calls(&self) -> Vec<SdkCall> {
        self.state.lock().calls.clone()
    }

    pub fn count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn last_call(&self) -> Option<SdkCall> {
        self.state.lock().calls.last().cloned()
    }

    fn record(&self, call: SdkCall) -> SdkResult<()> {
        let mut state = self.state.lock();
        state.calls.push(call);
        match &state.failure {
            Some(message) => Err(SdkError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn start_session(&self) {
        let mut state = self.state.lock();
        state.sessions_started += 1;
        state.session_id = Some(format!("session-{}", state.sessions_started));
    }
}

#[async_trait]
impl SessionSdk for RecordingSdk {
    async fn initialize(&self, context: &AppContext, config: SdkConfig) -> SdkResult<()> {
        self.record(SdkCall::Initialize {
            context: context.clone(),
            config,
        })?;
        if self.state.lock().session_id.is_none() {
            self.start_session();
        }
        Ok(())
    }

    async fn session_id(&self) -> SdkResult<String> {
        self.record(SdkCall::SessionId)?;
        self.state
            .lock()
            .session_id
            .clone()
            .ok_or_else(|| SdkError::new("No active session"))
    }

    async fn track_page_view(&self, name: &str, properties: Properties) -> SdkResult<()> {
        self.record(SdkCall::TrackPageView {
            name: name.to_string(),
            properties,
        })
    }

    async fn track_event(&self, name: &str, properties: Properties) -> SdkResult<()> {
        self.record(SdkCall::TrackEvent {
            name: name.to_string(),
            properties,
        })
    }

    async fn set_user_properties(
        &self,
        user_id: Option<&str>,
        properties: Properties,
    ) -> SdkResult<()> {
        self.record(SdkCall::SetUserProperties {
            user_id: user_id.map(str::to_string),
            properties,
        })
    }

    async fn start_video_recording(&self, activity: &ActivityContext) -> SdkResult<()> {
        self.record(SdkCall::StartVideoRecording {
            activity: activity.name.clone(),
        })
    }

    async fn stop_video_recording(&self) -> SdkResult<()> {
        self.record(SdkCall::StopVideoRecording)
    }

    async fn end_session(&self) -> SdkResult<()> {
        self.record(SdkCall::EndSession)?;
        self.state.lock().session_id = None;
        Ok(())
    }

    async fn restart_session(&self) -> SdkResult<()> {
        self.record(SdkCall::RestartSession)?;
        self.start_session();
        Ok(())
    }
}
