//! API handlers for the relay.

use crate::provider::ProviderError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;
use voicecall_types::SessionRequest;

/// Request body for `POST /create-web-call`.
///
/// Every field is optional at the wire level so a missing `agent_id` is
/// reported as a validation error rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWebCallBody {
    pub agent_id: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub retell_llm_dynamic_variables: Option<Map<String, Value>>,
}

impl TryFrom<CreateWebCallBody> for SessionRequest {
    type Error = ApiError;

    fn try_from(body: CreateWebCallBody) -> Result<Self, Self::Error> {
        let agent_id = body
            .agent_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::BadRequest("agent_id is required".to_string()))?;

        Ok(SessionRequest {
            agent_id,
            metadata: body.metadata,
            retell_llm_dynamic_variables: body.retell_llm_dynamic_variables,
        })
    }
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    /// Provider rejected the call; its status and raw body are surfaced as-is.
    #[error("provider error ({status}): {body}")]
    Provider { status: u16, body: String },
    #[error("internal server error")]
    Internal,
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { status, body } => {
                tracing::error!(status, body = %body, "provider API error");
                ApiError::Provider { status, body }
            }
            ProviderError::Transport(e) => {
                tracing::error!(error = %e, "failed to reach provider");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Provider { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({
                    "error": "Failed to create web call",
                    "details": body
                }),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Handler for `POST /create-web-call`.
///
/// Validates the body, forwards it to the provider with the relay's
/// credential and passes the provider's JSON back with `201 Created`.
pub async fn create_web_call_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreateWebCallBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected create-web-call body");
        ApiError::BadRequest(rejection.body_text())
    })?;
    let request = SessionRequest::try_from(body)?;

    let data = state.provider.create_web_call(&request).await?;

    tracing::info!(agent_id = %request.agent_id, "web call created");
    Ok((StatusCode::CREATED, Json(data)))
}
