//! # Admin principal
//!
//! There is exactly one kind of authenticated user: the administrator whose
//! email and password are configured on the server. [`AdminInfo`] is what the
//! authentication gate mints on a successful login, what is stored in the
//! session, and what [`get_current_admin`](crate::get_current_admin) hands
//! back to the dashboard. It is `Serialize + Deserialize + PartialEq` so it
//! crosses the server/client boundary unchanged and compiles for WASM.

use serde::{Deserialize, Serialize};

/// Role carried by a session. Only one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

/// The authenticated administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AdminInfo {
    /// The fixed principal issued for the configured admin email.
    pub fn admin(email: &str) -> Self {
        Self {
            id: "1".to_string(),
            email: email.to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
        }
    }
}
