//! Error types for AnswerForge
//!
//! The formatting engine itself has no fatal error class: malformed answers
//! degrade to minimal output. Errors here cover the edges around it:
//! - Option updates arriving in the wrong shape
//! - Configuration loading
//! - Serialization of inputs and outputs
//! - Error codes for machine-readable handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidFormat,

    // Internal errors (9xxx)
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidFormat => 1003,

            // Internal (9xxx)
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        self.code().as_code() < 9000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::InvalidFormat {
            message: "options must be an object".into(),
        };
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
        assert_eq!(err.code().as_code(), 1003);
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation {
            message: "expected a boolean".into(),
            field: Some("includeCitations".into()),
        };
        assert!(err.is_client_error());
        assert!(err.to_string().contains("expected a boolean"));
    }

    #[test]
    fn test_configuration_error_conversion() {
        let err: AppError = config::ConfigError::Message("missing section".into()).into();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
        assert_eq!(err.code().as_code(), 9002);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: AppError = parse.unwrap_err().into();
        assert_eq!(err.code(), ErrorCode::SerializationError);
        assert!(!err.is_client_error());
    }
}
