//! Error types for the configuration store

use std::path::PathBuf;
use thiserror::Error;

/// Store error enumeration
#[derive(Debug, Error)]
pub enum StoreError {
    /// Config directory could not be determined or created
    #[error("config directory unavailable: {0}")]
    Directory(String),

    /// Read or write of the record file failed
    #[error("failed to {op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
