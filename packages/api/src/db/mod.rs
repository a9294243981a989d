//! # Database module: survey document store
//!
//! Submitted surveys are schemaless JSON documents. They live in a single
//! PostgreSQL table (`surveys`: UUID key, `submitted_at`, `JSONB` document)
//! created by the embedded migrations in `packages/api/migrations`.
//!
//! ## Design
//!
//! [`Database`] owns the connection settings and opens the pool on first use
//! (a [`tokio::sync::OnceCell`] inside the value, not a process global). It is
//! handed to request handlers through application state. The first connect
//! tries verified TLS and falls back once to an unverified TLS connection.
//!
//! Handlers never touch SQL directly: they go through the [`SurveyStore`]
//! trait, implemented by [`PgSurveyStore`] and, for tests and local runs
//! without a database, [`MemorySurveyStore`].

#[cfg(feature = "server")]
mod memory;
#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
mod store;

#[cfg(feature = "server")]
pub use memory::MemorySurveyStore;
#[cfg(feature = "server")]
pub use pool::{migrate, Database};
#[cfg(feature = "server")]
pub use store::{DbError, PgSurveyStore, StoredSurvey, SurveyStore};
