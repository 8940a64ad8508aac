//! Call lifecycle state machine.
//!
//! [`SessionState`] is a plain reducer over user actions and
//! [`RuntimeEvent`]s. [`SessionController`] wires it to a [`TokenSource`] and a
//! [`MediaRuntime`], and [`SessionController::run`] drives everything from a
//! single task so no two transitions interleave.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::runtime::{EventReceiver, MediaRuntime, RuntimeEvent, StartCallParams};
use crate::token::TokenSource;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};
use voicecall_types::TranscriptEntry;

/// Message shown when the runtime reports an error without one.
const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    #[default]
    Idle,
    Connecting,
    Active,
    /// The last call finished normally; a new one may be started.
    Ended,
    /// The last attempt or call failed; see [`SessionState::error`].
    Error,
}

/// Everything the UI renders about the current call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub status: CallStatus,
    /// Set and cleared by talk events, independent of `status`.
    pub agent_talking: bool,
    pub transcript: Vec<TranscriptEntry>,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_calling(&self) -> bool {
        self.status == CallStatus::Active
    }

    pub fn is_connecting(&self) -> bool {
        self.status == CallStatus::Connecting
    }

    /// A new attempt wipes the previous error and transcript.
    pub fn begin_attempt(&mut self) {
        self.status = CallStatus::Connecting;
        self.error = None;
        self.transcript.clear();
    }

    /// Token retrieval or runtime start failed.
    ///
    /// Only a pending attempt moves to `Error`. If another attempt has since
    /// brought a call up, the call stays `Active` and only the message is
    /// recorded.
    pub fn start_failed(&mut self, message: impl Into<String>) {
        if self.status == CallStatus::Connecting {
            self.status = CallStatus::Error;
        }
        self.error = Some(message.into());
    }

    pub fn apply(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::CallStarted => {
                self.status = CallStatus::Active;
                self.error = None;
            }
            RuntimeEvent::CallEnded => {
                if self.status != CallStatus::Error {
                    self.status = CallStatus::Ended;
                }
                self.agent_talking = false;
            }
            RuntimeEvent::AgentStartTalking => self.agent_talking = true,
            RuntimeEvent::AgentStopTalking => self.agent_talking = false,
            RuntimeEvent::Update { transcript } => {
                if let Some(transcript) = transcript {
                    self.transcript = transcript;
                }
            }
            RuntimeEvent::Error { message } => {
                self.status = CallStatus::Error;
                self.agent_talking = false;
                self.error = Some(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
                );
            }
        }
    }
}

/// Snapshot published to the UI after every transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionView {
    pub status: CallStatus,
    pub is_calling: bool,
    pub is_connecting: bool,
    pub agent_talking: bool,
    pub transcript: Vec<TranscriptEntry>,
    pub error: Option<String>,
}

impl SessionView {
    pub fn status_label(&self) -> &'static str {
        if self.is_connecting {
            "Connecting..."
        } else if self.is_calling && self.agent_talking {
            "Agent Speaking"
        } else if self.is_calling {
            "Listening..."
        } else {
            "Ready"
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_connecting {
            "Connecting..."
        } else if self.is_calling {
            "End Call"
        } else {
            "Start Call"
        }
    }
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        Self {
            status: state.status,
            is_calling: state.is_calling(),
            is_connecting: state.is_connecting(),
            agent_talking: state.agent_talking,
            transcript: state.transcript.clone(),
            error: state.error.clone(),
        }
    }
}

/// User actions accepted by [`SessionController::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    End,
    /// End when a call is active, start otherwise.
    Toggle,
}

/// An in-flight start: token request followed by runtime start.
pub type StartAttempt = BoxFuture<'static, Result<(), ClientError>>;

pub struct SessionController<T: TokenSource, R: MediaRuntime> {
    config: ClientConfig,
    tokens: Arc<T>,
    runtime: Arc<R>,
    state: SessionState,
}

impl<T: TokenSource, R: MediaRuntime> SessionController<T, R> {
    pub fn new(config: ClientConfig, tokens: Arc<T>, runtime: Arc<R>) -> Self {
        Self {
            config,
            tokens,
            runtime,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> SessionView {
        SessionView::from(&self.state)
    }

    /// Whether the UI should enable the start action: no call is connecting
    /// or active. The controller itself does not refuse a start.
    pub fn can_start(&self) -> bool {
        !self.state.is_connecting() && !self.state.is_calling()
    }

    /// Moves to `Connecting` and returns the attempt to await.
    ///
    /// The returned future owns everything it needs, so runtime events can be
    /// applied while it is pending.
    pub fn begin_start(&mut self) -> StartAttempt {
        self.state.begin_attempt();

        let tokens = Arc::clone(&self.tokens);
        let runtime = Arc::clone(&self.runtime);
        let request = self.config.session_request();
        let audio = self.config.audio.clone();

        Box::pin(async move {
            let access_token = tokens.request_token(&request).await?;
            runtime
                .start_call(StartCallParams {
                    access_token,
                    sample_rate: audio.sample_rate,
                    capture_device_id: audio.capture_device_id,
                })
                .await
        })
    }

    /// Records the outcome of an attempt started with [`Self::begin_start`].
    pub fn finish_start(&mut self, result: Result<(), ClientError>) {
        if let Err(e) = result {
            error!(error = %e, "failed to start call");
            self.state.start_failed(e.to_string());
        }
    }

    pub async fn start(&mut self) {
        let attempt = self.begin_start();
        let result = attempt.await;
        self.finish_start(result);
    }

    /// Asks the runtime to hang up. The state changes when `CallEnded`
    /// arrives, not here.
    pub fn end(&mut self) {
        if self.state.is_calling() || self.state.is_connecting() {
            self.runtime.stop_call();
        } else {
            debug!(status = ?self.state.status, "end ignored, no call in progress");
        }
    }

    pub async fn toggle(&mut self) {
        if self.state.is_calling() {
            self.end();
        } else {
            self.start().await;
        }
    }

    pub fn handle_event(&mut self, event: RuntimeEvent) {
        match &event {
            RuntimeEvent::CallStarted => info!("call started"),
            RuntimeEvent::CallEnded => info!("call ended"),
            RuntimeEvent::AgentStartTalking => info!("agent started talking"),
            RuntimeEvent::AgentStopTalking => info!("agent stopped talking"),
            RuntimeEvent::Update { transcript } => {
                debug!(entries = ?transcript.as_ref().map(Vec::len), "transcript update")
            }
            RuntimeEvent::Error { message } => error!(message = ?message, "runtime error"),
        }
        self.state.apply(event);
    }

    /// Event loop: applies user commands, runtime events and start outcomes
    /// one at a time, publishing a [`SessionView`] after each.
    ///
    /// Returns when the command channel closes; the controller is dropped on
    /// the way out, which stops any session still open.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut events: EventReceiver,
        view: watch::Sender<SessionView>,
    ) {
        let mut attempts: FuturesUnordered<StartAttempt> = FuturesUnordered::new();
        view.send_replace(self.view());

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Start) => attempts.push(self.begin_start()),
                    Some(Command::End) => self.end(),
                    Some(Command::Toggle) => {
                        if self.state.is_calling() {
                            self.end();
                        } else {
                            attempts.push(self.begin_start());
                        }
                    }
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
                Some(result) = attempts.next(), if !attempts.is_empty() => {
                    self.finish_start(result);
                }
            }
            view.send_replace(self.view());
        }
    }
}

impl<T: TokenSource, R: MediaRuntime> Drop for SessionController<T, R> {
    fn drop(&mut self) {
        debug!("session controller torn down, stopping runtime");
        self.runtime.stop_call();
    }
}
