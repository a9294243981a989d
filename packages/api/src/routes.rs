//! HTTP endpoints.
//!
//! | Method | Path | Auth | Handler |
//! |--------|------|------|---------|
//! | `POST` | `/api/survey/submit` | none | [`submit_survey`] |
//! | `GET` | `/api/admin/surveys` | session | [`list_surveys`] |
//!
//! Login, logout and the current-session lookup are server functions in the
//! crate root; they share the same session.
//!
//! The session layer itself is installed by the binary, outside
//! [`protect`], so handlers and the route guard share one session.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tower_sessions::Session;

use crate::auth::{current_admin, require_admin};
use crate::db::{StoredSurvey, SurveyStore};
use crate::error::ApiError;
use crate::models::{SubmitResponse, SurveyListResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
}

/// API routes, without the session layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/survey/submit", post(submit_survey))
        .route("/api/admin/surveys", get(list_surveys))
        .with_state(state)
}

/// Put the dashboard route guard in front of every route of `router`.
pub fn protect(router: Router) -> Router {
    router.layer(middleware::from_fn(require_admin))
}

/// Store a survey draft. Any non-empty JSON object is accepted; field
/// formats are not re-checked here.
pub async fn submit_survey(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let mut document = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(document)) if !document.is_empty() => document,
        _ => {
            tracing::warn!(bytes = body.len(), "Rejected empty or malformed survey");
            return Err(ApiError::InvalidSurvey);
        }
    };

    let submitted_at = Utc::now();
    document.insert(
        "submittedAt".to_string(),
        Value::String(submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    document.insert(
        "id".to_string(),
        Value::String(submitted_at.timestamp_millis().to_string()),
    );

    let id = state
        .store
        .insert(submitted_at, document)
        .await
        .map_err(ApiError::Persistence)?;

    tracing::info!(%id, "Survey stored");
    Ok((StatusCode::CREATED, Json(SubmitResponse::created(id))))
}

/// Every stored survey, newest first. Requires an admin session.
pub async fn list_surveys(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<SurveyListResponse>, ApiError> {
    if current_admin(&session).await?.is_none() {
        return Err(ApiError::Unauthorized);
    }

    let surveys = state
        .store
        .list_newest_first()
        .await
        .map_err(ApiError::Listing)?;

    tracing::info!(count = surveys.len(), "Listed surveys");
    Ok(Json(SurveyListResponse {
        success: true,
        surveys: surveys.into_iter().map(StoredSurvey::into_document).collect(),
    }))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SESSION_ADMIN_KEY;
    use crate::db::MemorySurveyStore;
    use crate::models::AdminInfo;
    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use chrono::Duration;
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::collections::HashMap;
    use time::OffsetDateTime;
    use tower::ServiceExt;
    use tower_sessions::session::{Id, Record};
    use tower_sessions::{MemoryStore, SessionManagerLayer, SessionStore};

    const EMAIL: &str = "admin@tohatsu.com";

    fn app(store: MemorySurveyStore, sessions: MemoryStore) -> Router {
        let state = AppState {
            store: Arc::new(store),
        };
        let pages = router(state)
            .route("/admin/login", get(|| async { "login" }))
            .route("/admin/dashboard", get(|| async { "dashboard" }));
        let session_layer = SessionManagerLayer::new(sessions).with_secure(false);
        protect(pages).layer(session_layer)
    }

    /// Store an admin session expiring at `expiry_date` and return its cookie.
    async fn admin_session(sessions: &MemoryStore, expiry_date: OffsetDateTime) -> String {
        let admin = serde_json::to_value(AdminInfo::admin(EMAIL)).unwrap();
        let mut record = Record {
            id: Id::default(),
            data: HashMap::from([(SESSION_ADMIN_KEY.to_string(), admin)]),
            expiry_date,
        };
        sessions.create(&mut record).await.unwrap();
        format!("id={}", record.id)
    }

    async fn live_session(sessions: &MemoryStore) -> String {
        admin_session(sessions, OffsetDateTime::now_utc() + time::Duration::hours(1)).await
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_returns_created_with_inserted_id() {
        let store = MemorySurveyStore::new();
        let app = app(store.clone(), MemoryStore::default());

        let response = send(
            &app,
            post_json(
                "/api/survey/submit",
                json!({ "step1": "30-39", "fullName": "سالم", "phone": "0512345678" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["success"], json!(true));

        let stored = store.list_newest_first().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(body["id"], json!(stored[0].object_id.to_string()));
        assert_eq!(stored[0].document["step1"], json!("30-39"));
        assert!(stored[0].document["submittedAt"].is_string());
        assert!(stored[0].document["id"].is_string());
    }

    #[tokio::test]
    async fn test_empty_or_malformed_survey_is_rejected() {
        let store = MemorySurveyStore::new();
        let app = app(store.clone(), MemoryStore::default());

        for body in [json!({}).to_string(), "[1, 2]".to_string(), "{not json".to_string()] {
            let request = Request::post("/api/survey/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = send(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(response).await,
                json!({ "success": false, "error": "Invalid survey data" })
            );
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_submit_reports_store_failure() {
        let app = app(MemorySurveyStore::offline(), MemoryStore::default());
        let response = send(&app, post_json("/api/survey/submit", json!({ "step1": "60+" }))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Database connection failed"));
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_listing_requires_session() {
        let app = app(MemorySurveyStore::new(), MemoryStore::default());
        let response = send(&app, get_with_cookie("/api/admin/surveys", None)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = MemorySurveyStore::new();
        let now = Utc::now();
        for (name, age) in [("first", 3), ("third", 1), ("second", 2)] {
            let document = json!({ "fullName": name }).as_object().cloned().unwrap();
            store.insert(now - Duration::minutes(age), document).await.unwrap();
        }
        let sessions = MemoryStore::default();
        let cookie = live_session(&sessions).await;
        let app = app(store, sessions);

        let response = send(&app, get_with_cookie("/api/admin/surveys", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], json!(true));
        let surveys = body["surveys"].as_array().unwrap();
        let names: Vec<_> = surveys.iter().map(|s| s["fullName"].clone()).collect();
        assert_eq!(names, vec![json!("third"), json!("second"), json!("first")]);
        assert!(surveys.iter().all(|s| s["_id"].is_string()));
    }

    #[tokio::test]
    async fn test_listing_store_failure_is_500() {
        let sessions = MemoryStore::default();
        let cookie = live_session(&sessions).await;
        let app = app(MemorySurveyStore::offline(), sessions);
        let response = send(&app, get_with_cookie("/api/admin/surveys", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "success": false, "error": "Failed to fetch surveys" })
        );
    }

    #[tokio::test]
    async fn test_guard_redirects_dashboard_without_session() {
        let sessions = MemoryStore::default();
        let cookie = live_session(&sessions).await;
        let app = app(MemorySurveyStore::new(), sessions);

        let response = send(&app, get_with_cookie("/admin/dashboard", None)).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");

        let response = send(&app, get_with_cookie("/admin/login", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_with_cookie("/admin/dashboard", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expired_session_is_refused() {
        let sessions = MemoryStore::default();
        let cookie =
            admin_session(&sessions, OffsetDateTime::now_utc() - time::Duration::seconds(1)).await;
        let app = app(MemorySurveyStore::new(), sessions);

        let response = send(&app, get_with_cookie("/admin/dashboard", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");

        let response = send(&app, get_with_cookie("/api/admin/surveys", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_session_id_is_refused() {
        let app = app(MemorySurveyStore::new(), MemoryStore::default());
        let cookie = format!("id={}", Id::default());

        let response = send(&app, get_with_cookie("/admin/dashboard", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        let response = send(&app, get_with_cookie("/api/admin/surveys", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
