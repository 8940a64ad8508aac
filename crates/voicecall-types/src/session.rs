//! Call-creation payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A validated request to create one web call for an agent.
///
/// Optional fields that were not supplied are omitted from the serialized
/// form entirely; the provider must never see them as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Identifier of the hosted agent to talk to.
    pub agent_id: String,
    /// Opaque metadata attached to the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Opaque variables substituted into the agent's prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retell_llm_dynamic_variables: Option<Map<String, Value>>,
}

impl SessionRequest {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            metadata: None,
            retell_llm_dynamic_variables: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_dynamic_variables(mut self, variables: Map<String, Value>) -> Self {
        self.retell_llm_dynamic_variables = Some(variables);
        self
    }
}

/// The part of the provider's call-creation response the client consumes.
///
/// The relay never deserializes into this type; it forwards the provider body
/// verbatim. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebCallResponse {
    /// Short-lived token authorizing one media session.
    pub access_token: String,
    #[serde(default)]
    pub call_id: Option<String>,
}
