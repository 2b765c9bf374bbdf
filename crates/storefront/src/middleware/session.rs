//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The cookie is
//! signed with the configured secret and expires after one day of
//! inactivity, which is what the storefront issues instead of a standalone
//! bearer token.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::Key, service::SignedCookie};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::{self, ConfigError, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "kharido_session";

/// Session expiry time in seconds (1 day).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store and a signed cookie.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` if the configured secret cannot
/// back a cookie signing key.
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, ConfigError> {
    // Note: the session table is created via `kharido-cli migrate storefront`
    let store = PostgresStore::new(pool.clone());

    let key_bytes = config::session_key_bytes(config);
    let key = Key::try_from(key_bytes.as_slice()).map_err(|e| {
        ConfigError::InsecureSecret("KHARIDO_SESSION_SECRET".to_owned(), e.to_string())
    })?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_signed(key)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}
