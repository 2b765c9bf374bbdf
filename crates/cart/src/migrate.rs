//! One-time upgrade of legacy widget payloads.
//!
//! The two widget generations left bare-array carts under their own keys with
//! no version field. This module reads whichever legacy key is present
//! (preferring the newer v2), rewrites the cart as the current versioned
//! document, and deletes both legacy keys so the upgrade runs at most once
//! per slot.

use chrono::Utc;

use crate::error::CartError;
use crate::line::Cart;
use crate::schema::{self, CART_KEY, LEGACY_KEY_V1, LEGACY_KEY_V2};
use crate::storage::CartSlot;

/// Upgrade any legacy payload in `slot` to the current document form.
///
/// Returns `true` if a legacy cart was converted and written under
/// [`CART_KEY`]. When the unified key already exists, legacy leftovers are
/// deleted without touching it. Unparsable legacy payloads are dropped the
/// same way `load` drops unparsable current payloads: silently.
///
/// # Errors
///
/// Returns [`CartError::Storage`] if the backend fails, or
/// [`CartError::Encode`] if the converted document cannot be serialized.
pub async fn migrate_legacy<S: CartSlot>(slot: &S) -> Result<bool, CartError> {
    if slot.read(CART_KEY).await?.is_some() {
        drop_legacy_keys(slot).await?;
        return Ok(false);
    }

    let legacy = match slot.read(LEGACY_KEY_V2).await? {
        Some(raw) => Some(raw),
        None => slot.read(LEGACY_KEY_V1).await?,
    };

    let Some(raw) = legacy else {
        return Ok(false);
    };

    let migrated = match schema::parse_legacy(&raw) {
        Some(lines) => {
            let now = Utc::now();
            let cart =
                Cart::from_lines(lines.into_iter().map(|line| line.into_line(now)).collect());
            slot.write(CART_KEY, &schema::encode(&cart)?).await?;
            tracing::info!(lines = cart.len(), "migrated legacy cart payload");
            true
        }
        None => false,
    };

    drop_legacy_keys(slot).await?;
    Ok(migrated)
}

async fn drop_legacy_keys<S: CartSlot>(slot: &S) -> Result<(), CartError> {
    slot.remove(LEGACY_KEY_V1).await?;
    slot.remove(LEGACY_KEY_V2).await?;
    Ok(())
}
