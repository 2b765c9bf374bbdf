//! Integration tests for Kharido.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! kharido-cli migrate storefront
//!
//! # Start the storefront
//! cargo run -p kharido-storefront
//!
//! # Run integration tests (ignored by default)
//! cargo test -p kharido-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - Catalog and user endpoint tests
//! - `cart_flow` - End-to-end cart fragment tests (session-cookie driven)
//!
//! Tests are `#[ignore]`d so a plain `cargo test` run stays hermetic; they
//! expect a storefront at `KHARIDO_BASE_URL` (default `http://localhost:3000`)
//! with a migrated database behind it.
