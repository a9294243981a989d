//! Admin authentication.
//!
//! - [`AdminCredentials`] checks a login attempt against the configured admin
//!   email and password.
//! - [`sign_in`] binds the principal to the `tower-sessions` session;
//!   [`current_admin`] reads it back.
//! - [`require_admin`] is the route guard in front of the dashboard pages.

#[cfg(feature = "server")]
mod credentials;
#[cfg(feature = "server")]
mod guard;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use credentials::AdminCredentials;
#[cfg(feature = "server")]
pub use guard::{is_protected, require_admin, LOGIN_PATH, PROTECTED_PREFIX};
#[cfg(feature = "server")]
pub use session::{
    current_admin, end_session, sign_in, start_session, SESSION_ADMIN_KEY, SESSION_TTL,
};
