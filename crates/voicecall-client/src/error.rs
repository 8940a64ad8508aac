use thiserror::Error;

/// Failures surfaced to the UI as a single error string.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The relay answered the token request with a non-success status.
    #[error("Failed to register call")]
    Registration { status: u16 },

    /// The relay could not be reached or its reply was unreadable.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The provider runtime reported a failure.
    #[error("{0}")]
    Runtime(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
