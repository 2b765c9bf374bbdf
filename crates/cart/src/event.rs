//! Change notifications emitted after successful mutations.
//!
//! Renderers (navbar badge, slide-over panel) subscribe to the store instead
//! of every call site remembering to refresh them. The store emits exactly one
//! notification per effective mutation; no-op calls (removing or re-sizing an
//! absent line) stay silent.

use kharido_core::ProductId;

use crate::line::Cart;

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// A unit of the product was added (new line or quantity increment).
    Added(ProductId),
    /// The line for the product was removed.
    Removed(ProductId),
    /// The line's quantity was overwritten with the (clamped) value.
    QuantitySet(ProductId, u32),
    /// The whole cart was overwritten via an explicit `save`.
    Replaced,
    /// The persisted cart was cleared.
    Cleared,
    /// Checkout succeeded and the cart was cleared.
    CheckedOut,
}

/// A successful mutation, carrying the state the cart was left in.
#[derive(Debug, Clone, PartialEq)]
pub struct CartChange {
    /// Cart state after the mutation.
    pub cart: Cart,
    /// The mutation that produced it.
    pub kind: ChangeKind,
}
