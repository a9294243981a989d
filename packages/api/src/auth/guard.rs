//! Route guard for the admin dashboard pages.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use super::current_admin;
use crate::error::ApiError;

/// Every page at or below this path requires an admin session.
pub const PROTECTED_PREFIX: &str = "/admin/dashboard";

/// Where unauthenticated visitors of a protected page are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// `/admin/dashboard` and anything under it, but not `/admin/dashboards`.
pub fn is_protected(path: &str) -> bool {
    match path.strip_prefix(PROTECTED_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Middleware redirecting protected page requests without a session to the
/// login page. Other requests pass through untouched.
pub async fn require_admin(session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !is_protected(&path) {
        return next.run(request).await;
    }

    match current_admin(&session).await {
        Ok(Some(_)) => next.run(request).await,
        Ok(None) => {
            tracing::info!(%path, "No admin session, redirecting to login");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
        Err(err) => ApiError::Session(err).into_response(),
    }
}
