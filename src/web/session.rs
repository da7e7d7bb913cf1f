use time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, Session};

use crate::services::AuthenticatedUser;
use crate::web::error::WebError;

const SESSION_USER_KEY: &str = "user";

/// Fixed session lifetime, matching the cookie max-age announced at login.
const SESSION_TTL: Duration = Duration::hours(1);

/// Stores the identity in the session and pins the expiry to a fixed
/// deadline. The deadline does not slide on activity, so a session ends
/// one hour after login no matter what.
pub async fn establish(session: &Session, user: &AuthenticatedUser) -> Result<(), WebError> {
    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| WebError::Internal(format!("Failed to write session: {e}")))?;

    session.set_expiry(Some(Expiry::AtDateTime(
        OffsetDateTime::now_utc() + SESSION_TTL,
    )));

    Ok(())
}

/// The logged-in user, if any. Session store failures are treated as an
/// anonymous visitor rather than an error so public pages stay up when
/// the store is unhappy.
pub async fn current_user(session: &Session) -> Option<AuthenticatedUser> {
    match session.get::<AuthenticatedUser>(SESSION_USER_KEY).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read session; treating as anonymous");
            None
        }
    }
}

pub async fn clear(session: &Session) {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to flush session on logout");
    }
}
