//! Errors raised while loading source documents and configuration.
//!
//! Classification itself never fails; only reading input can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("malformed source document: {0}")]
    Source(#[from] serde_json::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ForgeError>;
