//! Error types for the ranking service
//!
//! Every fallible library operation returns [`RankingError`]. The binary and
//! bootstrap code wrap these in `anyhow` where extra context helps.

use crate::types::{BattleId, PlayerId};

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RankingError>;

/// Errors surfaced by the rating engine and its collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("Invalid request: {reason}")]
    Validation { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Battle not found: {battle_id}")]
    BattleNotFound { battle_id: BattleId },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal service error: {message}")]
    Internal { message: String },
}

impl RankingError {
    /// Shorthand for a validation failure
    pub fn validation(reason: impl Into<String>) -> Self {
        RankingError::Validation {
            reason: reason.into(),
        }
    }

    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        RankingError::Internal {
            message: message.into(),
        }
    }

    /// True for both player and battle lookups that came back empty
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RankingError::PlayerNotFound { .. } | RankingError::BattleNotFound { .. }
        )
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            RankingError::Validation { .. } => "validation",
            RankingError::PlayerNotFound { .. } | RankingError::BattleNotFound { .. } => {
                "not_found"
            }
            RankingError::Conflict { .. } => "conflict",
            RankingError::Configuration { .. } => "configuration",
            RankingError::Internal { .. } => "internal",
        }
    }
}
