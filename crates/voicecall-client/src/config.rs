use crate::error::ClientError;
use serde_json::{Map, Value};
use std::fmt;
use voicecall_types::SessionRequest;

/// Environment variable naming the agent every session talks to.
pub const AGENT_ID_ENV: &str = "VOICECALL_AGENT_ID";

/// Agent id baked in at build time, if one was provided.
const BUILD_AGENT_ID: Option<&str> = option_env!("VOICECALL_AGENT_ID");

fn default_sample_rate() -> u32 {
    24_000
}

fn default_capture_device() -> String {
    "default".to_string()
}

/// Fixed audio parameters handed to the runtime when a call starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub capture_device_id: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            capture_device_id: default_capture_device(),
        }
    }
}

/// Client-side configuration, built once and injected into the controller.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the relay (or of the routing layer in front of it).
    pub relay_url: String,
    pub agent_id: String,
    pub metadata: Option<Map<String, Value>>,
    pub dynamic_variables: Option<Map<String, Value>>,
    pub audio: AudioConfig,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("relay_url", &self.relay_url)
            .field("agent_id", &self.agent_id)
            .field("metadata", &self.metadata.as_ref().map(Map::len))
            .field(
                "dynamic_variables",
                &self.dynamic_variables.as_ref().map(Map::len),
            )
            .field("audio", &self.audio)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(relay_url: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
            agent_id: agent_id.into(),
            metadata: None,
            dynamic_variables: None,
            audio: AudioConfig::default(),
        }
    }

    /// Builds a config whose agent id comes from `VOICECALL_AGENT_ID`,
    /// preferring the runtime environment over the value compiled in.
    pub fn from_env(relay_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_env_with(relay_url, |key| std::env::var(key).ok())
    }

    pub fn from_env_with<F>(relay_url: impl Into<String>, env: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let agent_id = env(AGENT_ID_ENV)
            .or_else(|| BUILD_AGENT_ID.map(str::to_string))
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ClientError::Config(format!("{} is not set", AGENT_ID_ENV)))?;

        Ok(Self::new(relay_url, agent_id))
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_dynamic_variables(mut self, variables: Map<String, Value>) -> Self {
        self.dynamic_variables = Some(variables);
        self
    }

    /// The request sent to the relay for every new call.
    pub fn session_request(&self) -> SessionRequest {
        SessionRequest {
            agent_id: self.agent_id.clone(),
            metadata: self.metadata.clone(),
            retell_llm_dynamic_variables: self.dynamic_variables.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn audio_defaults_match_runtime_expectations() {
        let audio = AudioConfig::default();
        assert_eq!(audio.sample_rate, 24_000);
        assert_eq!(audio.capture_device_id, "default");
    }

    #[test]
    fn env_agent_id_wins() {
        let config =
            ClientConfig::from_env_with("http://relay", |_| Some("agent_env".to_string())).unwrap();
        assert_eq!(config.agent_id, "agent_env");
    }

    #[test]
    fn blank_agent_id_is_a_config_error() {
        let result = ClientConfig::from_env_with("http://relay", |_| Some("  ".to_string()));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn session_request_carries_optional_fields() {
        let mut vars = Map::new();
        vars.insert("first_name".into(), json!("Ada"));
        let request = ClientConfig::new("http://relay", "agent_1")
            .with_dynamic_variables(vars)
            .session_request();

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "agent_id": "agent_1",
                "retell_llm_dynamic_variables": { "first_name": "Ada" }
            })
        );
    }
}
