use crate::error::Result;
use async_trait::async_trait;

pub mod file_storage;
pub mod memory_storage;
pub mod snapshot;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// A durable key-value slot the board store persists into.
///
/// Each call is independently atomic at best; nothing is assumed across calls.
/// A slot that has been cleared behaves exactly like one never written.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the raw bytes under `key`, or `None` if nothing is stored there
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces whatever is stored under `key`
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Clears `key`; clearing an empty slot is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
