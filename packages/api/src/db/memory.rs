use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{DbError, StoredSurvey, SurveyStore};

/// In-memory [`SurveyStore`] for tests and runs without a database.
#[derive(Clone, Debug, Default)]
pub struct MemorySurveyStore {
    surveys: Arc<Mutex<Vec<StoredSurvey>>>,
    offline: bool,
}

impl MemorySurveyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, as if the database were unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.surveys.lock().map(|surveys| surveys.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), DbError> {
        if self.offline {
            return Err(DbError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> DbError {
    DbError::Unavailable("store lock poisoned".to_string())
}

#[async_trait]
impl SurveyStore for MemorySurveyStore {
    async fn insert(
        &self,
        submitted_at: DateTime<Utc>,
        document: Map<String, Value>,
    ) -> Result<String, DbError> {
        self.check()?;
        let object_id = Uuid::new_v4();
        self.surveys.lock().map_err(poisoned)?.push(StoredSurvey {
            object_id,
            submitted_at,
            document,
        });
        Ok(object_id.to_string())
    }

    async fn list_newest_first(&self) -> Result<Vec<StoredSurvey>, DbError> {
        self.check()?;
        let mut surveys: Vec<StoredSurvey> =
            self.surveys.lock().map_err(poisoned)?.iter().rev().cloned().collect();
        // Stable sort: equal timestamps keep the most recent insert first.
        surveys.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(surveys)
    }
}
