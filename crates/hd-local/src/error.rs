use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Logo is {size} bytes; the limit is {limit} bytes")]
    LogoTooLarge { size: usize, limit: usize },

    #[error("Unsupported logo format: {0} (use JPG, PNG, or GIF)")]
    UnsupportedLogoFormat(String),
}
