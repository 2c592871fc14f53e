use crate::{
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

/// In-process storage, shared between clones.
///
/// Counts successful writes and can be switched into a failing mode to
/// simulate a full or unavailable store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent write fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Puts raw bytes into a slot without counting it as a write
    pub fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.slots().insert(key.to_string(), bytes.into());
    }

    /// Raw bytes currently in a slot
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.slots().get(key).cloned()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still a consistent map: every update is a single insert or remove
        self.inner
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.raw(key))
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(BoardError::StorageError("storage quota exceeded".to_string()));
        }
        self.slots().insert(key.to_string(), bytes.to_vec());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots().remove(key);
        Ok(())
    }
}
