//! Error types for search operations

use crate::error::AppError;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Malformed filter input is deliberately NOT an error: bad values
/// degrade to defaults or empty matches. The variants here cover the
/// failures that genuinely abort a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A content store lookup failed; the whole search call fails rather
    /// than silently dropping that entity kind's contribution
    #[error("Content store lookup failed: {0}")]
    Store(#[from] AppError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Store(inner) => inner,
            SearchError::InvalidConfiguration(msg) => AppError::Configuration(msg),
        }
    }
}
