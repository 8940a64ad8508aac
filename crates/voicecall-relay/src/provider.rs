//! Client for the provider's call-creation endpoint.

use crate::config::ProviderConfig;
use serde_json::Value;
use thiserror::Error;
use voicecall_types::SessionRequest;

/// Path of the web-call creation endpoint, relative to the provider base URL.
const CREATE_WEB_CALL_PATH: &str = "/v2/create-web-call";

/// Failures talking to the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("provider rejected request with status {status}")]
    Rejected { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin wrapper over `reqwest::Client` that holds the bearer credential.
///
/// One attempt per call, no retries and no timeout beyond the transport
/// defaults.
pub struct ProviderClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                CREATE_WEB_CALL_PATH
            ),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Creates a web call and returns the provider's JSON body untouched.
    pub async fn create_web_call(&self, request: &SessionRequest) -> Result<Value, ProviderError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
