//! Domain service for registration and login.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately generic: the login flow never reveals whether the
    /// account exists or the password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with that email already exists")]
    DuplicateUsername,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// The identity stored in the session after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and returns the new identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PasswordMismatch`] when the confirmation does
    /// not match, [`AuthError::Validation`] for a malformed email or short
    /// password, and [`AuthError::DuplicateUsername`] when the email is
    /// already registered.
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AuthenticatedUser, AuthError>;

    /// Verifies credentials and returns the identity to store in the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;
}
