//! Cart line items and the cart itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kharido_core::ProductId;

/// The catalog data needed to put a product in the cart.
///
/// Only a snapshot: once a line exists, repeat adds never refresh its stored
/// name, price, or image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    /// Stable product id, unique within a cart.
    pub id: ProductId,
    /// Display label.
    pub name: String,
    /// Unit price at time of add.
    pub price: Decimal,
    /// Image locator for display (may be empty).
    pub img: String,
}

/// One line of the cart: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id, unique within the cart.
    pub id: ProductId,
    /// Display label, frozen at first insertion.
    pub name: String,
    /// Unit price, frozen at first insertion.
    pub price: Decimal,
    /// Image locator, frozen at first insertion (may be empty).
    #[serde(default)]
    pub img: String,
    /// Always at least 1; removal is a distinct operation, never quantity 0.
    pub quantity: u32,
    /// When the line was first inserted. Never updated.
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Price of the whole line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An ordered sequence of [`CartLine`]s, one per distinct product id.
///
/// Order is insertion order: new products append, repeat adds leave position
/// untouched. The `CartStore` maintains the one-line-per-id invariant; this
/// type only offers read access and the pure aggregate queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Sum of `price * quantity` over all lines. Empty carts total zero.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total unit count across all lines (what the navbar badge shows).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub(crate) fn get_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub(crate) fn retain_except(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
