//! Configuration management for the MODS mapping engine

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct PurlConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub purl: PurlConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix MODS_COCINA_)
            .add_source(
                Environment::with_prefix("MODS_COCINA")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override PURL base from PURL_BASE_URL env var if present
            .set_override_option("purl.base_url", env::var("PURL_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for PurlConfig {
    fn default() -> Self {
        Self {
            base_url: crate::purl::DEFAULT_PURL_BASE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            purl: PurlConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
