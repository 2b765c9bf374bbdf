//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use kharido_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Stable product id; cart lines reference it.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Image locator (may be empty).
    pub img: String,
    /// Optional category used by the storefront's filter control.
    pub category: Option<String>,
    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a catalog product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub img: String,
    pub category: Option<String>,
}
