//! Pluggable slot storage for the serialized cart.
//!
//! The store persists the whole cart as one string value under one key, the
//! way the original widget used a browser local-storage entry. Backends only
//! need to provide read/write/remove of that single slot; the storefront
//! supplies a session-backed implementation, and [`MemorySlot`] serves tests
//! and embedding.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Error reported by a [`CartSlot`] backend.
///
/// Backends differ too much for a shared taxonomy; the message carries
/// whatever the backend knows. Read-side errors are absorbed by `load`,
/// write-side errors propagate unretried.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(String);

impl StorageError {
    /// Create a storage error from a backend message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A string-keyed slot holding at most one serialized cart per key.
#[allow(async_fn_in_trait)]
pub trait CartSlot {
    /// Read the value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process slot backend.
///
/// Clones share the same underlying map, so a cloned handle observes writes
/// made through the original.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    cells: Arc<Mutex<HashMap<String, String>>>,
}

impl CartSlot for MemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cells = self
            .cells
            .lock()
            .map_err(|_| StorageError::new("memory slot poisoned"))?;
        Ok(cells.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cells = self
            .cells
            .lock()
            .map_err(|_| StorageError::new("memory slot poisoned"))?;
        cells.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut cells = self
            .cells
            .lock()
            .map_err(|_| StorageError::new("memory slot poisoned"))?;
        cells.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_slot_round_trips_values() {
        let slot = MemorySlot::default();
        assert_eq!(slot.read("k").await.ok(), Some(None));

        slot.write("k", "v").await.expect("write");
        assert_eq!(slot.read("k").await.ok(), Some(Some("v".to_owned())));

        slot.remove("k").await.expect("remove");
        assert_eq!(slot.read("k").await.ok(), Some(None));
    }

    #[tokio::test]
    async fn removing_an_absent_key_is_ok() {
        let slot = MemorySlot::default();
        assert!(slot.remove("nothing").await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let slot = MemorySlot::default();
        let other = slot.clone();
        slot.write("k", "v").await.expect("write");
        assert_eq!(other.read("k").await.ok(), Some(Some("v".to_owned())));
    }
}
