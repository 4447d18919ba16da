//! Error types for the cricket statistics tracker

use crate::cli::types::{MatchId, PlayerId};
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse ID: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Failed to parse date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("System time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),

    #[error("Invalid {context}: {field} {message}")]
    Validation {
        context: String,
        field: String,
        message: String,
    },

    #[error("Invalid {kind}: {value}")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("Malformed record for match {match_id}: {message}")]
    MalformedRecord { match_id: MatchId, message: String },

    #[error("Player ID not provided, {env_var} not set and no active player recorded")]
    MissingPlayerId { env_var: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: MatchId },

    #[error("Could not determine a data directory for the database")]
    NoDataDir,
}

impl StatsError {
    /// Shorthand for building a `Validation` error.
    pub fn validation(
        context: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        StatsError::Validation {
            context: context.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Replace the context of a `Validation` error; other variants pass through.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            StatsError::Validation { field, message, .. } => StatsError::Validation {
                context: context.into(),
                field,
                message,
            },
            other => other,
        }
    }

    /// Re-tag an error raised while re-validating a stored row.
    pub(crate) fn for_stored_match(self, match_id: MatchId) -> Self {
        match self {
            StatsError::Validation { field, message, .. } => StatsError::MalformedRecord {
                match_id,
                message: format!("{} {}", field, message),
            },
            StatsError::InvalidEnum { kind, value } => StatsError::MalformedRecord {
                match_id,
                message: format!("invalid {}: {}", kind, value),
            },
            StatsError::InvalidDate(e) => StatsError::MalformedRecord {
                match_id,
                message: format!("invalid date: {}", e),
            },
            StatsError::Json(e) => StatsError::MalformedRecord {
                match_id,
                message: e.to_string(),
            },
            other => other,
        }
    }
}
