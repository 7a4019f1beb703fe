//! Mobile bridge: exposes the native session-recording SDK (sessions, events,
//! screen views, user properties, video recording) to cross-platform
//! application layers such as React Native and Flutter.
//!
//! # Modules
//!
//! - [`sdk`] Capability trait the native SDK is reached through
//! - [`adapter`] The bridge operations and their rejection codes
//! - [`channel`] Name-based method dispatch with serializable replies
//! - [`navigation`] Automatic screen tracking from navigation state
//! - [`testing`] Recording SDK fake

pub mod adapter;
pub mod channel;
pub mod navigation;
pub mod outcome;
pub mod sdk;
pub mod testing;

pub use adapter::BridgeAdapter;
pub use channel::{BridgeChannel, ChannelReply, MethodCall};
pub use outcome::{BridgeFailure, Outcome};
pub use sdk::{SdkResult, SessionSdk};
pub use testing::RecordingSdk;
