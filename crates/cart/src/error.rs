//! Cart store error type.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by cart store operations.
///
/// Malformed persisted state is deliberately not represented here: decoding
/// failures are handled inside `load` by substituting an empty cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed to read or write the cart slot.
    #[error("cart storage: {0}")]
    Storage(#[from] StorageError),

    /// The cart document could not be serialized.
    #[error("cart serialization: {0}")]
    Encode(#[from] serde_json::Error),

    /// Checkout was attempted with no items in the cart.
    #[error("cart is empty")]
    EmptyCart,
}
