//! Console SDK backend: stands in for the native SDK when exercising a bridge
//! wiring off-device. Keeps a single in-memory session and logs every call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use sessioncam_core::{ActivityContext, AppContext, Properties, SdkConfig, SdkError};
use sessioncam_mobile_bridge::{SdkResult, SessionSdk};

#[derive(Debug, Clone)]
struct ConsoleSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    event_count: u32,
    recording: bool,
}

impl ConsoleSession {
    fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            event_count: 0,
            recording: false,
        }
    }
}

#[derive(Default)]
struct State {
    config: Option<SdkConfig>,
    session: Option<ConsoleSession>,
    user_id: Option<String>,
}

#[derive(Default)]
pub struct ConsoleSdk {
    state: Mutex<State>,
}

impl ConsoleSdk {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_config(state: &State) -> SdkResult<&SdkConfig> {
        state
            .config
            .as_ref()
            .ok_or_else(|| SdkError::new("SDK not initialized"))
    }

    fn touch(state: &mut State) -> SdkResult<Uuid> {
        let session = state
            .session
            .as_mut()
            .ok_or_else(|| SdkError::new("No active session"))?;
        session.event_count += 1;
        Ok(session.id)
    }

    fn finish(session: ConsoleSession) {
        let duration = (Utc::now() - session.started_at).num_seconds().max(0);
        info!(
            session_id = %session.id,
            events = session.event_count,
            duration_seconds = duration,
            "session ended"
        );
    }
}

#[async_trait]
impl SessionSdk for ConsoleSdk {
    async fn initialize(&self, context: &AppContext, config: SdkConfig) -> SdkResult<()> {
        let mut state = self.state.lock();
        info!(
            platform = ?context.platform,
            app_id = %context.app_id,
            app_version = %context.app_version,
            api_url = %config.api_url,
            "sdk initialized"
        );
        state.config = Some(config);
        if state.session.is_none() {
            let session = ConsoleSession::start();
            info!(session_id = %session.id, "session started");
            state.session = Some(session);
        }
        Ok(())
    }

    async fn session_id(&self) -> SdkResult<String> {
        let state = self.state.lock();
        state
            .session
            .as_ref()
            .map(|s| s.id.to_string())
            .ok_or_else(|| SdkError::new("No active session"))
    }

    async fn track_page_view(&self, name: &str, properties: Properties) -> SdkResult<()> {
        let mut state = self.state.lock();
        Self::require_config(&state)?;
        let session_id = Self::touch(&mut state)?;
        info!(%session_id, screen = name, properties = properties.len(), "page view");
        Ok(())
    }

    async fn track_event(&self, name: &str, properties: Properties) -> SdkResult<()> {
        let mut state = self.state.lock();
        if !Self::require_config(&state)?.enable_event_tracking {
            return Err(SdkError::new("Event tracking is disabled"));
        }
        let session_id = Self::touch(&mut state)?;
        info!(%session_id, event = name, properties = properties.len(), "event");
        Ok(())
    }

    async fn set_user_properties(
        &self,
        user_id: Option<&str>,
        properties: Properties,
    ) -> SdkResult<()> {
        let mut state = self.state.lock();
        Self::require_config(&state)?;
        state.user_id = user_id.map(str::to_string);
        info!(user_id = ?state.user_id, properties = properties.len(), "user properties set");
        Ok(())
    }

    async fn start_video_recording(&self, activity: &ActivityContext) -> SdkResult<()> {
        let mut state = self.state.lock();
        if !Self::require_config(&state)?.enable_video_recording {
            return Err(SdkError::new("Video recording is disabled"));
        }
        let session = state
            .session
            .as_mut()
            .ok_or_else(|| SdkError::new("No active session"))?;
        session.recording = true;
        info!(session_id = %session.id, activity = %activity.name, "video recording started");
        Ok(())
    }

    async fn stop_video_recording(&self) -> SdkResult<()> {
        let mut state = self.state.lock();
        if let Some(session) = state.session.as_mut() {
            if session.recording {
                session.recording = false;
                info!(session_id = %session.id, "video recording stopped");
            }
        }
        Ok(())
    }

    async fn end_session(&self) -> SdkResult<()> {
        let mut state = self.state.lock();
        let session = state
            .session
            .take()
            .ok_or_else(|| SdkError::new("No active session"))?;
        Self::finish(session);
        Ok(())
    }

    async fn restart_session(&self) -> SdkResult<()> {
        let mut state = self.state.lock();
        Self::require_config(&state)?;
        if let Some(previous) = state.session.take() {
            Self::finish(previous);
        }
        let session = ConsoleSession::start();
        info!(session_id = %session.id, "session started");
        state.session = Some(session);
        Ok(())
    }
}
