//! Client session controller for voicecall.
//!
//! Requests a session token from the relay, hands it to the provider's media
//! runtime and mirrors the runtime's events into observable call state:
//! status, talking indicator, transcript and error text.
//!
//! The runtime and the token source are traits so the state machine can be
//! exercised without a network or a real media stack:
//!
//! ```rust,ignore
//! use voicecall_client::{ClientConfig, Command, RelayTokenSource, SessionController};
//!
//! let config = ClientConfig::from_env("http://localhost:8080")?;
//! let tokens = Arc::new(RelayTokenSource::new(&config.relay_url));
//! let (event_tx, event_rx) = voicecall_client::event_channel();
//! let runtime = Arc::new(MyRuntime::new(event_tx));
//!
//! let (view_tx, view_rx) = tokio::sync::watch::channel(Default::default());
//! let (cmd_tx, cmd_rx) = tokio::sync::mpsc::channel(8);
//! tokio::spawn(SessionController::new(config, tokens, runtime).run(cmd_rx, event_rx, view_tx));
//! cmd_tx.send(Command::Start).await?;
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod runtime;
pub mod token;

pub use config::{AudioConfig, ClientConfig};
pub use controller::{CallStatus, Command, SessionController, SessionState, SessionView};
pub use error::ClientError;
pub use runtime::{event_channel, EventReceiver, EventSender, MediaRuntime, RuntimeEvent, StartCallParams};
pub use token::{RelayTokenSource, TokenSource};
