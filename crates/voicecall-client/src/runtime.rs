//! The provider's client-side media runtime, as seen by the controller.
//!
//! The runtime owns the live media session. It is driven through two
//! commands ([`MediaRuntime::start_call`] and [`MediaRuntime::stop_call`]) and
//! reports everything else as [`RuntimeEvent`]s pushed into a channel that the
//! controller drains.

use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use voicecall_types::TranscriptEntry;

/// Parameters for opening a media session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCallParams {
    pub access_token: String,
    pub sample_rate: u32,
    pub capture_device_id: String,
}

/// Lifecycle and transcript events emitted by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RuntimeEvent {
    CallStarted,
    CallEnded,
    AgentStartTalking,
    AgentStopTalking,
    /// Full transcript snapshot; replaces whatever was shown before.
    Update {
        #[serde(default)]
        transcript: Option<Vec<TranscriptEntry>>,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Sending half handed to a runtime implementation.
pub type EventSender = mpsc::UnboundedSender<RuntimeEvent>;
/// Receiving half drained by the controller.
pub type EventReceiver = mpsc::UnboundedReceiver<RuntimeEvent>;

/// Creates the event channel connecting a runtime to a controller.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

#[async_trait]
pub trait MediaRuntime: Send + Sync + 'static {
    /// Opens a media session. Resolves once the runtime has accepted the
    /// token; `CallStarted` is reported separately as an event.
    async fn start_call(&self, params: StartCallParams) -> Result<(), ClientError>;

    /// Terminates any in-progress session. Must be safe to call when idle.
    fn stop_call(&self);
}
