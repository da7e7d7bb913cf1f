//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, AuthenticatedUser};
use crate::web::validation::is_valid_email;
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let username = username.trim();
        if !is_valid_email(username) {
            return Err(AuthError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        if password.len() < 8 {
            return Err(AuthError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let user = self
            .store
            .create_user(username, password, &self.security)
            .await?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let username = username.trim();

        let is_valid = self.store.verify_user_password(username, password).await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }
}
