//! HTTP calls from the browser to the survey endpoints. Authentication goes
//! through the `api` server functions instead.

use api::{SubmitResponse, SurveyListResponse};
use reqwest::StatusCode;
use survey::{Submission, SubmissionSink, SurveyRecord};
use thiserror::Error;

/// Origin used outside the browser, matching `dx serve`'s default address.
const NATIVE_ORIGIN: &str = "http://127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },
}

/// Absolute URL for an API path on the current origin.
pub fn endpoint(path: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return format!("{origin}{path}");
        }
    }
    format!("{NATIVE_ORIGIN}{path}")
}

/// Full page load of `path`, so the server-side guard sees the new session.
pub fn navigate(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to navigate to {}: {:?}", path, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("Navigation to {} requested outside the browser", path);
}

fn server_error(status: StatusCode, message: Option<String>) -> ClientError {
    ClientError::Server {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| status.to_string()),
    }
}

/// `POST /api/survey/submit`, returning the stored id.
pub async fn submit_survey(submission: &Submission) -> Result<String, ClientError> {
    let response = reqwest::Client::new()
        .post(endpoint("/api/survey/submit"))
        .json(submission)
        .send()
        .await?;
    let status = response.status();
    let body: SubmitResponse = response.json().await?;
    match body.id {
        Some(id) if status.is_success() && body.success => Ok(id),
        _ => Err(server_error(status, body.error)),
    }
}

/// Endpoint the wizard delivers finished surveys to.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurveyEndpoint;

impl SubmissionSink for SurveyEndpoint {
    type Error = ClientError;

    async fn submit(&self, submission: &Submission) -> Result<String, ClientError> {
        submit_survey(submission).await
    }
}

/// All stored surveys, newest first.
pub async fn fetch_surveys() -> Result<Vec<SurveyRecord>, ClientError> {
    let response = reqwest::get(endpoint("/api/admin/surveys")).await?;
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        status if status.is_success() => {
            let body: SurveyListResponse = response.json().await?;
            Ok(records_from(&body))
        }
        status => Err(server_error(status, None)),
    }
}

fn records_from(body: &SurveyListResponse) -> Vec<SurveyRecord> {
    body.surveys.iter().map(SurveyRecord::from_value).collect()
}
