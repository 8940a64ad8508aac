//! Session-token retrieval from the relay.

use crate::error::ClientError;
use async_trait::async_trait;
use tracing::debug;
use voicecall_types::{SessionRequest, WebCallResponse};

/// Path the client posts to; the routing layer strips `/api` before the relay.
const CREATE_WEB_CALL_PATH: &str = "/api/create-web-call";

/// Anything that can exchange a session request for a provider access token.
#[async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn request_token(&self, request: &SessionRequest) -> Result<String, ClientError>;
}

/// Fetches tokens from the relay over HTTP.
#[derive(Debug, Clone)]
pub struct RelayTokenSource {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayTokenSource {
    pub fn new(relay_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), relay_url)
    }

    pub fn with_client(http: reqwest::Client, relay_url: &str) -> Self {
        Self {
            http,
            endpoint: format!(
                "{}{}",
                relay_url.trim_end_matches('/'),
                CREATE_WEB_CALL_PATH
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TokenSource for RelayTokenSource {
    async fn request_token(&self, request: &SessionRequest) -> Result<String, ClientError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Registration {
                status: status.as_u16(),
            });
        }

        let body: WebCallResponse = response.json().await?;
        debug!(call_id = ?body.call_id, "received access token from relay");
        Ok(body.access_token)
    }
}
