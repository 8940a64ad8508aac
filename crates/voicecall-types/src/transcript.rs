//! Transcript entries as delivered by the provider runtime.

use serde::{Deserialize, Serialize};

/// Who spoke a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Agent,
    User,
}

impl SpeakerRole {
    /// Label shown next to a line in the conversation view.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::User => "You",
        }
    }
}

/// One utterance in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: SpeakerRole,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: SpeakerRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
