//! Capability surface of the native session-recording SDK.
//!
//! The bridge never reaches a global SDK instance. Callers inject an
//! `Arc<dyn SessionSdk>`, so tests and tooling can substitute their own.

use async_trait::async_trait;

use sessioncam_core::{ActivityContext, AppContext, Properties, SdkConfig, SdkError};

pub type SdkResult<T> = Result<T, SdkError>;

#[async_trait]
pub trait SessionSdk: Send + Sync {
    async fn initialize(&self, context: &AppContext, config: SdkConfig) -> SdkResult<()>;

    /// Identifier of the current session. Fails when no session is active.
    async fn session_id(&self) -> SdkResult<String>;

    async fn track_page_view(&self, name: &str, properties: Properties) -> SdkResult<()>;

    async fn track_event(&self, name: &str, properties: Properties) -> SdkResult<()>;

    async fn set_user_properties(
        &self,
        user_id: Option<&str>,
        properties: Properties,
    ) -> SdkResult<()>;

    async fn start_video_recording(&self, activity: &ActivityContext) -> SdkResult<()>;

    async fn stop_video_recording(&self) -> SdkResult<()>;

    async fn end_session(&self) -> SdkResult<()>;

    async fn restart_session(&self) -> SdkResult<()>;
}
