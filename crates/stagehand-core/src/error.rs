//! Domain error types.

use thiserror::Error;

/// Top-level domain error type shared by every Stagehand crate.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required entity (character, scene, default scene) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The submitted action id is not present on the character's current stage.
    /// Callers recover by re-displaying the current stage.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A caller passed an argument outside the accepted domain. These are
    /// programming errors, not content or runtime conditions.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Authored content failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Whether the caller can recover by re-rendering the current stage.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidAction(_))
    }
}
