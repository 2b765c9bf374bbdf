//! Kharido Cart - cart state store with versioned key-value persistence.
//!
//! The store owns the canonical list of cart line items. State lives entirely
//! in a pluggable string slot ([`CartSlot`]): every mutating operation reloads
//! the persisted document, applies one change, and writes the document back.
//! No in-memory cart outlives a single operation, so concurrent holders of the
//! same slot are last-writer-wins by construction.
//!
//! # Example
//!
//! ```
//! use kharido_cart::{CartStore, MemorySlot, ProductInfo};
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> Result<(), kharido_cart::CartError> {
//! let store = CartStore::new(MemorySlot::default());
//! store
//!     .add_item(ProductInfo {
//!         id: "p-1".into(),
//!         name: "Shoe".to_owned(),
//!         price: Decimal::new(4999, 2),
//!         img: String::new(),
//!     })
//!     .await?;
//!
//! let cart = store.load().await;
//! assert_eq!(cart.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Persistence
//!
//! The current on-disk form is a versioned [`schema::CartDocument`] under the
//! key [`schema::CART_KEY`]. Two legacy widget payloads (bare JSON arrays
//! under `kharido_cart_v1` / `kharido_cart_v2`) are upgraded once via
//! [`migrate::migrate_legacy`].
//!
//! # Failure semantics
//!
//! Absent or malformed persisted state is silently treated as an empty cart;
//! storage write failures propagate to the caller unretried.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod error;
mod event;
mod line;
pub mod migrate;
pub mod schema;
mod storage;
mod store;

pub use error::CartError;
pub use event::{CartChange, ChangeKind};
pub use line::{Cart, CartLine, ProductInfo};
pub use storage::{CartSlot, MemorySlot, StorageError};
pub use store::CartStore;

pub use kharido_core::ProductId;
