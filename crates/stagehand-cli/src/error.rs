//! Stagehand CLI error types.

use stagehand_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the terminal driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading content or talking to the terminal failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine refused a request.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_config_errors() {
        let err = AppError::Config("STAGEHAND_CONTENT must be set".to_owned());

        assert_eq!(
            err.to_string(),
            "configuration error: STAGEHAND_CONTENT must be set"
        );
    }

    #[test]
    fn test_domain_errors_convert_transparently() {
        let err: AppError = DomainError::NotFound("no default scene configured".to_owned()).into();

        assert!(matches!(err, AppError::Domain(DomainError::NotFound(_))));
        assert_eq!(err.to_string(), DomainError::NotFound("no default scene configured".to_owned()).to_string());
    }
}
