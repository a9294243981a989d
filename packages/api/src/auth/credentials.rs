use crate::models::AdminInfo;
use crate::settings::AdminSettings;

/// The single admin account, taken from configuration.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive match on both values. Blank input never matches.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<AdminInfo> {
        if email.is_empty() || password.is_empty() {
            return None;
        }
        if self.email.is_empty() || self.password.is_empty() {
            return None;
        }
        if email == self.email && password == self.password {
            Some(AdminInfo::admin(&self.email))
        } else {
            None
        }
    }
}

impl From<&AdminSettings> for AdminCredentials {
    fn from(settings: &AdminSettings) -> Self {
        Self::new(settings.email.clone(), settings.password.clone())
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
