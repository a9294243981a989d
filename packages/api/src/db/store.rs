use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use thiserror::Error;
use uuid::Uuid;

use super::Database;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Database query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("Survey store unavailable: {0}")]
    Unavailable(String),
}

/// One stored submission.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSurvey {
    pub object_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub document: Map<String, Value>,
}

impl StoredSurvey {
    /// The document as returned by the listing endpoint: the stored fields
    /// plus `_id` (the store key) and `submittedAt` from the timestamp column.
    pub fn into_document(self) -> Value {
        let mut document = self.document;
        document.insert("_id".to_string(), Value::String(self.object_id.to_string()));
        document.insert(
            "submittedAt".to_string(),
            Value::String(self.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(document)
    }
}

/// Persistence for survey documents.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Store one document and return its generated id.
    async fn insert(
        &self,
        submitted_at: DateTime<Utc>,
        document: Map<String, Value>,
    ) -> Result<String, DbError>;

    /// Every stored document, most recent `submitted_at` first.
    async fn list_newest_first(&self) -> Result<Vec<StoredSurvey>, DbError>;
}

#[derive(sqlx::FromRow)]
struct SurveyRow {
    object_id: Uuid,
    submitted_at: DateTime<Utc>,
    document: Json<Value>,
}

impl From<SurveyRow> for StoredSurvey {
    fn from(row: SurveyRow) -> Self {
        let document = match row.document.0 {
            Value::Object(document) => document,
            _ => Map::new(),
        };
        Self {
            object_id: row.object_id,
            submitted_at: row.submitted_at,
            document,
        }
    }
}

/// [`SurveyStore`] backed by the `surveys` table.
#[derive(Clone)]
pub struct PgSurveyStore {
    db: Arc<Database>,
}

impl PgSurveyStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SurveyStore for PgSurveyStore {
    async fn insert(
        &self,
        submitted_at: DateTime<Utc>,
        document: Map<String, Value>,
    ) -> Result<String, DbError> {
        let pool = self.db.handle().await?;
        let object_id = Uuid::new_v4();

        sqlx::query("INSERT INTO surveys (object_id, submitted_at, document) VALUES ($1, $2, $3)")
            .bind(object_id)
            .bind(submitted_at)
            .bind(Json(Value::Object(document)))
            .execute(pool)
            .await?;

        Ok(object_id.to_string())
    }

    async fn list_newest_first(&self) -> Result<Vec<StoredSurvey>, DbError> {
        let pool = self.db.handle().await?;

        let rows: Vec<SurveyRow> = sqlx::query_as(
            "SELECT object_id, submitted_at, document FROM surveys ORDER BY submitted_at DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(StoredSurvey::from).collect())
    }
}
