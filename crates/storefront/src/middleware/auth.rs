//! Session-based authentication extractor and helpers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::user::User;
use crate::models::{CurrentUser, session_keys};

/// Store the logged-in user in the session.
///
/// # Errors
///
/// Returns the session backend error if the write fails.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    let current = CurrentUser {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    };
    session.insert(session_keys::CURRENT_USER, current).await
}

/// Remove the logged-in user from the session.
///
/// # Errors
///
/// Returns the session backend error if the removal fails.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map(|_| ())
}

/// Extractor that rejects requests without a logged-in user.
///
/// Handlers that take `RequireAuth(user)` only run for authenticated
/// sessions; everything else gets a 401.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(format!("session unavailable: {msg}")))?;

        let user = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
            .map_err(|e| AppError::Internal(format!("session read failed: {e}")))?;

        user.map(Self)
            .ok_or_else(|| AppError::Unauthorized("login required".to_owned()))
    }
}
