//! Session-backed cart slot.
//!
//! Adapts the request's `tower_sessions::Session` to the cart crate's
//! [`CartSlot`] trait, so each visitor's cart lives in their session record
//! the way the original widget's cart lived in browser local storage.

use tower_sessions::Session;

use kharido_cart::{CartSlot, StorageError};

/// [`CartSlot`] over the current request's session.
#[derive(Debug, Clone)]
pub struct SessionSlot {
    session: Session,
}

impl SessionSlot {
    /// Wrap a request session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartSlot for SessionSlot {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.session
            .get::<String>(key)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.session
            .insert(key, value.to_owned())
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.session
            .remove::<String>(key)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::new(e.to_string()))
    }
}
