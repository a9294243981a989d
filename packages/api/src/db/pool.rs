//! Lazily opened PostgreSQL pool.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tokio::sync::OnceCell;

use super::DbError;
use crate::settings::DatabaseSettings;

/// Owns the connection settings and the pool built from them on first use.
///
/// Shared through [`AppState`](crate::routes::AppState) as an `Arc<Database>`.
pub struct Database {
    settings: DatabaseSettings,
    pool: OnceCell<PgPool>,
}

impl Database {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self {
            settings,
            pool: OnceCell::new(),
        }
    }

    /// Get or initialize the pool. Concurrent first callers share one attempt.
    pub async fn handle(&self) -> Result<&PgPool, DbError> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<PgPool, DbError> {
        let mut modes = ssl_modes(self.settings.tls).iter().copied();
        let mut primary_err = None;

        while let Some(mode) = modes.next() {
            match self.open(mode).await {
                Ok(pool) => {
                    if primary_err.is_some() {
                        tracing::warn!(
                            database = %self.settings.name,
                            "Connected to database without certificate verification"
                        );
                    } else {
                        tracing::info!(database = %self.settings.name, "Connected to database");
                    }
                    return Ok(pool);
                }
                Err(err) => {
                    let has_fallback = modes.len() > 0;
                    match &primary_err {
                        None if has_fallback => tracing::warn!(
                            error = %err,
                            "Database connection failed, retrying with relaxed certificate verification"
                        ),
                        None => tracing::error!(error = %err, "Database connection failed"),
                        Some(first) => tracing::error!(
                            error = %first,
                            fallback_error = %err,
                            "Database fallback connection failed"
                        ),
                    }
                    primary_err.get_or_insert(err);
                }
            }
        }

        match primary_err {
            Some(err) => Err(DbError::Connect(err)),
            None => Err(DbError::Unavailable("no connection mode to try".to_string())),
        }
    }

    async fn open(&self, ssl_mode: PgSslMode) -> Result<PgPool, sqlx::Error> {
        let options = PgConnectOptions::from_str(&self.settings.url)?
            .database(&self.settings.name)
            .ssl_mode(ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(Duration::from_secs(self.settings.connect_timeout))
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(pool)
    }
}

/// TLS modes tried in order: the first is the primary attempt, the rest are
/// fallbacks. Only a TLS-enabled deployment falls back, and only to
/// encryption without certificate verification.
fn ssl_modes(tls: bool) -> &'static [PgSslMode] {
    if tls {
        &[PgSslMode::VerifyFull, PgSslMode::Require]
    } else {
        &[PgSslMode::Prefer]
    }
}

/// Apply the embedded migrations for the `surveys` table.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
