//! Key-value persistence for the basket
//!
//! The basket core only sees the [`KeyValueStore`] trait; the durable
//! implementation is a fjall keyspace on disk, and tests inject an
//! in-memory store instead.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use fjall::Keyspace;

use crate::error::CartPilotError;
use crate::Result;

/// String key-value store, the shape of a browser's local storage.
///
/// All operations are synchronous; the persisted copy must reflect the
/// most recent in-memory state as soon as a call returns.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Durable on-disk store backed by a fjall keyspace
pub struct FjallStore {
    store: Keyspace,
}

impl FjallStore {
    /// Open (or create) the store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| CartPilotError::persistence(format!("failed to open store: {e}")))?;
        let store = db
            .keyspace("cartpilot", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| CartPilotError::persistence(format!("failed to open keyspace: {e}")))?;
        Ok(Self { store })
    }
}

impl KeyValueStore for FjallStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let bytes = self
            .store
            .get(key.as_bytes())
            .map_err(|e| CartPilotError::persistence(format!("read failed: {e}")))?;
        match bytes {
            Some(bytes) => {
                let value = String::from_utf8(bytes.to_vec())
                    .map_err(|e| CartPilotError::persistence(format!("non-UTF8 value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.store
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| CartPilotError::persistence(format!("write failed: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.store
            .remove(key.as_bytes())
            .map_err(|e| CartPilotError::persistence(format!("remove failed: {e}")))?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries, e.g. a corrupt payload
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    /// A poisoned lock just means another thread panicked mid-write; the
    /// map itself is still a plain HashMap, so keep serving it.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.put("k", "v1").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v1".to_string()));

        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_store_survives_poisoned_lock() {
        let store = MemoryStore::new();
        store.put("k", "v1").unwrap();

        // Panic while holding the lock to poison it
        let panicked = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = store.entries.lock().unwrap();
                    panic!("poison the mutex");
                })
                .join()
        });
        assert!(panicked.is_err());

        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_fjall_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();

        store.put("basket", r#"[{"productId":"1"}]"#).unwrap();
        assert_eq!(
            store.get("basket").unwrap(),
            Some(r#"[{"productId":"1"}]"#.to_string())
        );

        store.remove("basket").unwrap();
        assert_eq!(store.get("basket").unwrap(), None);
    }
}
