use serde::{Deserialize, Serialize};

use crate::search::SearchConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search engine configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: CMS_SEARCH)
            .add_source(
                config::Environment::with_prefix("CMS_SEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
