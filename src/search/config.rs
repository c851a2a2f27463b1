//! Search configuration

use serde::{Deserialize, Serialize};

/// Search service configuration.
///
/// Only the aggregator's behavior is configurable. The scoring weights,
/// snippet geometry and pagination clamp are contract constants and live
/// next to the code that applies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Offer query suggestions for short or empty-result searches
    pub enable_suggestions: bool,

    /// Maximum number of suggestions returned
    pub suggestion_limit: usize,

    /// Queries shorter than this many characters trigger suggestions
    pub min_query_length: usize,

    /// Attach highlight snippets to search hits
    pub enable_highlighting: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_suggestions: true,
            suggestion_limit: 10,
            min_query_length: 3,
            enable_highlighting: true,
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn enable_suggestions(mut self, enabled: bool) -> Self {
        self.config.enable_suggestions = enabled;
        self
    }

    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.config.suggestion_limit = limit;
        self
    }

    pub fn min_query_length(mut self, length: usize) -> Self {
        self.config.min_query_length = length;
        self
    }

    pub fn enable_highlighting(mut self, enabled: bool) -> Self {
        self.config.enable_highlighting = enabled;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
