//! Fakes shared by the controller tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use voicecall_client::{
    ClientConfig, ClientError, EventSender, MediaRuntime, RuntimeEvent, StartCallParams,
    TokenSource,
};
use voicecall_types::SessionRequest;

pub fn test_config() -> ClientConfig {
    ClientConfig::new("http://relay.test", "agent_test")
}

/// Token source returning a fixed token or failing, optionally held behind a
/// gate so tests can observe requests while they are in flight. Scripted
/// outcomes, when present, are consumed in request order before `token`.
pub struct FakeTokenSource {
    token: Option<String>,
    script: Mutex<VecDeque<Option<String>>>,
    gate: Option<Arc<Semaphore>>,
    pub requests: Mutex<Vec<SessionRequest>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeTokenSource {
    pub fn ok(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            script: Mutex::new(VecDeque::new()),
            gate: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            token: None,
            ..Self::ok("")
        }
    }

    pub fn gated(token: &str, gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::ok(token)
        }
    }

    /// Answers successive requests with `outcomes` (`None` fails).
    pub fn scripted(outcomes: Vec<Option<&str>>) -> Self {
        Self {
            script: Mutex::new(
                outcomes
                    .into_iter()
                    .map(|o| o.map(str::to_string))
                    .collect(),
            ),
            ..Self::ok("")
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenSource for FakeTokenSource {
    async fn request_token(&self, request: &SessionRequest) -> Result<String, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.script.lock().unwrap().pop_front();
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match scripted.unwrap_or_else(|| self.token.clone()) {
            Some(token) => Ok(token),
            None => Err(ClientError::Registration { status: 500 }),
        }
    }
}

/// Runtime that records commands and reports lifecycle events like the real
/// one: `CallStarted` after a successful start, `CallEnded` after a stop.
pub struct FakeRuntime {
    events: EventSender,
    start_error: Option<String>,
    emit_started: bool,
    pub starts: Mutex<Vec<StartCallParams>>,
    pub stops: AtomicUsize,
}

impl FakeRuntime {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            start_error: None,
            emit_started: true,
            starts: Mutex::new(Vec::new()),
            stops: AtomicUsize::new(0),
        }
    }

    pub fn failing(events: EventSender, message: &str) -> Self {
        Self {
            start_error: Some(message.to_string()),
            ..Self::new(events)
        }
    }

    /// Accepts the start but never reports `CallStarted`.
    pub fn silent(events: EventSender) -> Self {
        Self {
            emit_started: false,
            ..Self::new(events)
        }
    }

    pub fn emit(&self, event: RuntimeEvent) {
        let _ = self.events.send(event);
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn start_count(&self) -> usize {
        self.starts.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaRuntime for FakeRuntime {
    async fn start_call(&self, params: StartCallParams) -> Result<(), ClientError> {
        self.starts.lock().unwrap().push(params);
        if let Some(message) = &self.start_error {
            return Err(ClientError::Runtime(message.clone()));
        }
        if self.emit_started {
            self.emit(RuntimeEvent::CallStarted);
        }
        Ok(())
    }

    fn stop_call(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.emit(RuntimeEvent::CallEnded);
    }
}
