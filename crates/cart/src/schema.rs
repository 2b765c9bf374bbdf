//! Persisted cart layout, current and legacy.
//!
//! The current form is a [`CartDocument`] envelope with an explicit schema
//! version under [`CART_KEY`]. The two widget generations before it each
//! stored a bare JSON array of line records under their own key
//! ([`LEGACY_KEY_V1`], [`LEGACY_KEY_V2`]); those arrays carried prices as JSON
//! numbers and an optional `addedAt` in epoch milliseconds. The formats are
//! mutually incompatible and are only read by [`crate::migrate`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::line::{Cart, CartLine};

/// Slot key of the unified, versioned cart document.
pub const CART_KEY: &str = "kharido_cart";

/// Slot key of the first-generation widget payload (dollar-formatted UI).
pub const LEGACY_KEY_V1: &str = "kharido_cart_v1";

/// Slot key of the second-generation widget payload (rupee-formatted UI).
pub const LEGACY_KEY_V2: &str = "kharido_cart_v2";

/// Version written into every [`CartDocument`]. v1 and v2 are the bare-array
/// generations that never carried a version field.
pub const SCHEMA_VERSION: u32 = 3;

/// The unified persisted form: a version tag plus the lines.
#[derive(Debug, Deserialize)]
pub struct CartDocument {
    /// Schema version; anything but [`SCHEMA_VERSION`] is treated as foreign.
    pub schema: u32,
    /// The cart lines, insertion order.
    pub lines: Vec<CartLine>,
}

#[derive(Serialize)]
struct CartDocumentRef<'a> {
    schema: u32,
    lines: &'a [CartLine],
}

/// Serialize a cart as the current document form.
pub(crate) fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(&CartDocumentRef {
        schema: SCHEMA_VERSION,
        lines: cart.lines(),
    })
}

/// Decode a persisted document, treating anything malformed as "no cart".
///
/// This is the single place unparsable or wrong-shape persisted state is
/// handled; callers never see an error from it.
pub(crate) fn decode(raw: &str) -> Cart {
    match serde_json::from_str::<CartDocument>(raw) {
        Ok(doc) if doc.schema == SCHEMA_VERSION => Cart::from_lines(doc.lines),
        Ok(doc) => {
            tracing::debug!(schema = doc.schema, "foreign cart schema, starting empty");
            Cart::default()
        }
        Err(err) => {
            tracing::debug!(%err, "unparsable cart payload, starting empty");
            Cart::default()
        }
    }
}

/// One record of a legacy bare-array payload.
///
/// Field tolerance is deliberate: the widgets wrote prices as JSON numbers,
/// sometimes omitted images, and only the later generation stamped `addedAt`.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyLine {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub img: String,
    #[serde(default = "one")]
    pub quantity: i64,
    #[serde(rename = "addedAt", default)]
    pub added_at: Option<i64>,
}

const fn one() -> i64 {
    1
}

impl LegacyLine {
    /// Convert to the current line form.
    ///
    /// Quantities clamp to at least 1, prices to at least 0; a missing
    /// `addedAt` becomes the migration instant.
    pub(crate) fn into_line(self, migrated_at: DateTime<Utc>) -> CartLine {
        // from_f64 yields the shortest representation, so 49.99 stays 49.99
        // instead of the full binary expansion of the double.
        let price = Decimal::from_f64(self.price)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        let quantity = u32::try_from(self.quantity.max(1)).unwrap_or(u32::MAX);
        let added_at = self
            .added_at
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(migrated_at);

        CartLine {
            id: self.id.into(),
            name: self.name,
            price,
            img: self.img,
            quantity,
            added_at,
        }
    }
}

/// Parse a legacy bare-array payload. `None` means the payload is unusable.
pub(crate) fn parse_legacy(raw: &str) -> Option<Vec<LegacyLine>> {
    match serde_json::from_str::<Vec<LegacyLine>>(raw) {
        Ok(lines) => Some(lines),
        Err(err) => {
            tracing::debug!(%err, "unparsable legacy cart payload, dropping it");
            None
        }
    }
}
