//! JSON bodies exchanged over the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/survey/submit` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SubmitResponse {
    pub fn created(id: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
            details: None,
        }
    }
}

/// Body of a successful `GET /api/admin/surveys`. Each survey is the stored
/// document with `_id` as a plain string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyListResponse {
    pub success: bool,
    pub surveys: Vec<Value>,
}
