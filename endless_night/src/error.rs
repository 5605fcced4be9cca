//! Session errors. Lookups that miss surface as `*NotFound` variants.

use thiserror::Error;
use world_forge::{ElementId, WorldId};

use crate::dialogue::{ConversationId, GenerationError};
use crate::knowledge::KnowledgeId;
use crate::session::SessionId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("world {0} not found")]
    WorldNotFound(WorldId),

    #[error("location {0} not found")]
    LocationNotFound(ElementId),

    #[error("character {0} not found")]
    CharacterNotFound(ElementId),

    #[error("conversation {0} not found")]
    ConversationNotFound(ConversationId),

    #[error("knowledge {0} not found")]
    KnowledgeNotFound(KnowledgeId),

    #[error("conversation {0} has already ended")]
    ConversationEnded(ConversationId),

    #[error("session {0} has ended")]
    SessionEnded(SessionId),

    #[error("session {0} is already loaded")]
    SessionActive(SessionId),

    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("failed to serialize session: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Check if this is a failed lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SessionError::SessionNotFound(_)
                | SessionError::WorldNotFound(_)
                | SessionError::LocationNotFound(_)
                | SessionError::CharacterNotFound(_)
                | SessionError::ConversationNotFound(_)
                | SessionError::KnowledgeNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
