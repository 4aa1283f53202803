use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {}", path.display())]
    SourceUnavailable { source_id: String, path: PathBuf },

    #[error("Industry file not found: {}", path.display())]
    IndustryUnavailable { industry: String, path: PathBuf },

    #[error("Unknown {kind}: {key}. Available: {}", available.join(", "))]
    UnknownKey {
        kind: &'static str,
        key: String,
        available: Vec<String>,
    },

    #[error("Malformed table {source_id}: {reason}")]
    MalformedTable { source_id: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
