use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Content store / database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            AppError::Validation("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Database("test".to_string()).error_code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Configuration("missing search section".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing search section"
        );
    }
}
