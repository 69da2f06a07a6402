//! Error types for the MODS mapping engine

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum MapError {
    #[error("XML error: {0}")]
    Xml(#[from] crate::xml::XmlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for mapping operations
pub type MapResult<T> = Result<T, MapError>;
