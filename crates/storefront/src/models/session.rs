//! Session-related types.
//!
//! Types stored in the session for authentication and cart UI state.

use serde::{Deserialize, Serialize};

use kharido_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the slide-over cart panel's open/closed flag.
    pub const CART_PANEL_OPEN: &str = "cart_panel_open";
}
