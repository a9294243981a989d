//! # API crate: survey server for the marketing questionnaire
//!
//! Shared response models compile everywhere (the UI deserializes them in the
//! browser). Everything that touches the database, sessions or axum sits
//! behind the `server` feature.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | none | JSON bodies and the `AdminInfo` principal |
//! | [`auth`] | `server` | Admin credential check, session helpers, dashboard route guard |
//! | [`db`] | `server` | Lazily connected PostgreSQL handle, `SurveyStore` trait and its stores |
//! | [`error`] | `server` | `ApiError` and its HTTP mapping |
//! | [`routes`] | `server` | axum handlers for survey submit and listing |
//! | [`settings`] | `server` | Configuration from `.env`, `survey.toml` and the environment |
//!
//! ## Server Functions
//!
//! - **Authentication**: `login`, `logout`, `get_current_admin`
//!
//! `login` reads the configured [`AdminCredentials`](auth::AdminCredentials)
//! from an `axum::Extension` installed by the server binary.

use dioxus::prelude::*;

pub mod auth;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod settings;

pub use models::{AdminInfo, Role, SubmitResponse, SurveyListResponse};

#[cfg(feature = "server")]
pub use routes::{protect, router, AppState};
#[cfg(feature = "server")]
pub use settings::{Settings, SettingsError};

/// The admin bound to the current session, if any.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn get_current_admin() -> Result<Option<AdminInfo>, ServerFnError> {
    auth::current_admin(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn get_current_admin() -> Result<Option<AdminInfo>, ServerFnError> {
    Ok(None)
}

/// Log in as the configured admin. `Ok(None)` means the credentials did not
/// match and no session was issued.
#[cfg(feature = "server")]
#[post(
    "/api/auth/login",
    session: tower_sessions::Session,
    credentials: axum::Extension<std::sync::Arc<auth::AdminCredentials>>
)]
pub async fn login(email: String, password: String) -> Result<Option<AdminInfo>, ServerFnError> {
    auth::sign_in(&session, &credentials, &email, &password)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<Option<AdminInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    auth::end_session(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}
