//! Authentication error type.

use thiserror::Error;

use kharido_core::EmailError;

use crate::db::RepositoryError;

/// Errors surfaced by the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email address is structurally invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// An account already exists for the email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Wrong email or password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// The user repository failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
