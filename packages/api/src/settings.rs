//! Server configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! `survey.toml` next to the binary, and environment variables (a `.env` file
//! is loaded first). Every required variable must be present and non-empty;
//! all missing ones are reported together.

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use sha2::{Digest, Sha512};
use thiserror::Error;
use tower_sessions::cookie::Key;

/// Config key and the environment variable that overrides it.
const REQUIRED: [(&str, &str); 6] = [
    ("database.url", "DATABASE_URL"),
    ("database.name", "DATABASE_NAME"),
    ("session.secret", "SESSION_SECRET"),
    ("session.site_url", "SITE_URL"),
    ("admin.email", "ADMIN_EMAIL"),
    ("admin.password", "ADMIN_PASSWORD"),
];

const OPTIONAL: [(&str, &str); 3] = [
    ("database.max_connections", "DATABASE_MAX_CONNECTIONS"),
    ("database.connect_timeout", "DATABASE_CONNECT_TIMEOUT"),
    ("database.tls", "DATABASE_TLS"),
];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("SITE_URL must start with http:// or https://, got {0:?}")]
    InvalidSiteUrl(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_connections: u32,
    /// Seconds to wait for a connection before giving up.
    pub connect_timeout: u64,
    /// Require TLS with full certificate verification on the first attempt.
    pub tls: bool,
}

#[derive(Clone, Deserialize)]
pub struct SessionSettings {
    pub secret: String,
    pub site_url: String,
}

impl SessionSettings {
    /// Cookie signing key derived from the configured secret.
    pub fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.secret.as_bytes());
        Key::from(digest.as_slice())
    }

    /// Only mark cookies `Secure` when the site is served over https.
    pub fn secure_cookies(&self) -> bool {
        self.site_url.starts_with("https://")
    }
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("secret", &"<redacted>")
            .field("site_url", &self.site_url)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct AdminSettings {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSettings")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub admin: AdminSettings,
}

impl Settings {
    /// Load from `.env`, `survey.toml` and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("database.url", "")?
            .set_default("database.name", "")?
            .set_default("database.max_connections", 10_i64)?
            .set_default("database.connect_timeout", 5_i64)?
            .set_default("database.tls", true)?
            .set_default("session.secret", "")?
            .set_default("session.site_url", "")?
            .set_default("admin.email", "")?
            .set_default("admin.password", "")?
            .add_source(
                File::with_name("survey.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            );

        for (key, variable) in REQUIRED.iter().chain(OPTIONAL.iter()) {
            builder = builder.set_override_option(*key, lookup(variable))?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let values = [
            &self.database.url,
            &self.database.name,
            &self.session.secret,
            &self.session.site_url,
            &self.admin.email,
            &self.admin.password,
        ];
        let missing: Vec<&'static str> = values
            .iter()
            .zip(REQUIRED.iter())
            .filter(|(value, _)| value.trim().is_empty())
            .map(|(_, (_, variable))| *variable)
            .collect();
        if !missing.is_empty() {
            return Err(SettingsError::Missing(missing));
        }

        let site_url = &self.session.site_url;
        if !(site_url.starts_with("http://") || site_url.starts_with("https://")) {
            return Err(SettingsError::InvalidSiteUrl(site_url.clone()));
        }
        Ok(())
    }
}
