use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid sort key '{0}'. Valid keys: priority, status, project")]
    InvalidSortKey(String),

    #[error("Corrupt board snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),
}
