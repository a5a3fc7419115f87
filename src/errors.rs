//! Error types for the game math engine
//!
//! Every failure is local and value-returned. Unknown game identifiers are
//! not errors at all; see [`crate::games::run_game_math`].

use crate::games::types::GameType;

/// Root error type for all engine operations
#[derive(Debug, thiserror::Error)]
pub enum GameMathError {
    /// The round value is not a finite number in `[0, 1)`
    #[error("Invalid input value {value}: must be finite and within [0, 1)")]
    InvalidInput { value: f64 },

    /// A caller-supplied option is present but outside its domain
    #[error("Invalid option '{option}' for {game}: {reason}")]
    InvalidOption {
        game: GameType,
        option: &'static str,
        reason: String,
    },

    /// Configuration or override errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Configuration and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid override for {game}: {reason}")]
    InvalidOverride { game: GameType, reason: String },
}

impl GameMathError {
    /// Shorthand used by the generators when rejecting an option
    pub fn invalid_option(game: GameType, option: &'static str, reason: impl Into<String>) -> Self {
        GameMathError::InvalidOption {
            game,
            option,
            reason: reason.into(),
        }
    }
}

impl ConfigurationError {
    pub(crate) fn invalid_value(field: &str, value: impl ToString, reason: &str) -> Self {
        ConfigurationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

// Convenience type alias for Results
pub type GameMathResult<T> = Result<T, GameMathError>;
