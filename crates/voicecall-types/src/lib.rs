//! Shared wire types for the voicecall relay and client.
//!
//! Both halves of the system speak the same JSON shapes: the client posts a
//! [`SessionRequest`] to the relay, the relay forwards it to the provider, and
//! the provider's reply (carrying the access token) travels back unchanged.
//! Transcript entries are delivered by the provider runtime and rendered by
//! the client.

pub mod session;
pub mod transcript;

pub use session::{SessionRequest, WebCallResponse};
pub use transcript::{SpeakerRole, TranscriptEntry};
