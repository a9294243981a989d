//! Session storage for the admin principal.

use time::{Duration, OffsetDateTime};
use tower_sessions::session::Error as SessionError;
use tower_sessions::{Expiry, Session};

use super::AdminCredentials;
use crate::models::AdminInfo;

/// Key for storing the admin principal in the session.
pub const SESSION_ADMIN_KEY: &str = "admin";

/// Sessions expire this long after login.
pub const SESSION_TTL: Duration = Duration::hours(24);

/// Bind `admin` to the session under a fresh id, valid for [`SESSION_TTL`].
pub async fn start_session(session: &Session, admin: &AdminInfo) -> Result<(), SessionError> {
    session.cycle_id().await?;
    session.insert(SESSION_ADMIN_KEY, admin).await?;
    session.set_expiry(Some(Expiry::AtDateTime(OffsetDateTime::now_utc() + SESSION_TTL)));
    Ok(())
}

/// Check a login attempt and, on a match, start a fresh admin session.
/// `Ok(None)` means the credentials did not match; the session is untouched.
pub async fn sign_in(
    session: &Session,
    credentials: &AdminCredentials,
    email: &str,
    password: &str,
) -> Result<Option<AdminInfo>, SessionError> {
    let Some(admin) = credentials.authenticate(email, password) else {
        tracing::warn!(%email, "Admin login failed");
        return Ok(None);
    };

    start_session(session, &admin).await?;
    tracing::info!(email = %admin.email, "Admin logged in");
    Ok(Some(admin))
}

/// The admin bound to this session, if any.
pub async fn current_admin(session: &Session) -> Result<Option<AdminInfo>, SessionError> {
    session.get(SESSION_ADMIN_KEY).await
}

pub async fn end_session(session: &Session) -> Result<(), SessionError> {
    session.flush().await
}
