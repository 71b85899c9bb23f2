use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use hr_pipeline_backend::dto::sync_dto::AtsCandidateRecord;
use hr_pipeline_backend::error::Result;
use hr_pipeline_backend::models::candidate::PipelineStatus;
use hr_pipeline_backend::services::ats_client::AtsClient;
use hr_pipeline_backend::AppState;
use serde_json::{json, Value as JsonValue};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

struct NoopAts;

#[axum::async_trait]
impl AtsClient for NoopAts {
    fn is_configured(&self) -> bool {
        false
    }

    async fn fetch_candidates(&self) -> Result<Vec<AtsCandidateRecord>> {
        Ok(Vec::new())
    }

    async fn push_status(&self, _registration_id: &str, _status: PipelineStatus) -> Result<()> {
        Ok(())
    }
}

async fn setup_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    let state = AppState::new(pool, Arc::new(NoopAts));
    hr_pipeline_backend::routes::api_router().with_state(state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn timestamp(value: &JsonValue) -> DateTime<Utc> {
    value
        .as_str()
        .expect("timestamp string")
        .parse()
        .expect("parse timestamp")
}

#[tokio::test]
async fn create_candidate_applies_pipeline_defaults() {
    let app = setup_app().await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "first_name": "A", "last_name": "B", "email": "a@b.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["pipeline_status"], "Applied");
    assert_eq!(created["admin_approval"], "Pending");
    assert!(created["indeed_registration_id"].is_null());
    assert!(created["last_sync_timestamp"].is_null());
    assert!(timestamp(&created["updated_at"]) >= timestamp(&created["created_at"]));
}

#[tokio::test]
async fn create_candidate_names_the_missing_field() {
    let app = setup_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "first_name": "A", "last_name": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn create_candidate_rejects_duplicate_email() {
    let app = setup_app().await;

    let payload = json!({ "first_name": "A", "last_name": "B", "email": "dup@b.com" });
    let (status, _) = send_json(&app, "POST", "/api/candidates", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, "POST", "/api/candidates", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn get_unknown_candidate_returns_404() {
    let app = setup_app().await;

    let (status, _) = send_json(&app, "GET", "/api/candidates/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_patches_fields_and_validates_status_vocabulary() {
    let app = setup_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "first_name": "A", "last_name": "B", "email": "a@b.com" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/candidates/{}", id),
        Some(json!({ "phone": "555-0100", "pipeline_status": "Interviewing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "555-0100");
    assert_eq!(updated["pipeline_status"], "Interviewing");
    // Untouched fields survive the patch.
    assert_eq!(updated["first_name"], "A");
    assert!(timestamp(&updated["updated_at"]) > timestamp(&updated["created_at"]));

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/candidates/{}", id),
        Some(json!({ "pipeline_status": "OnHold" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("OnHold"));
}

#[tokio::test]
async fn approve_and_deny_set_both_status_axes() {
    let app = setup_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "first_name": "A", "last_name": "B", "email": "a@b.com" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, approved) = send_json(
        &app,
        "POST",
        &format!("/api/candidates/{}/approve", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["pipeline_status"], "Approved");
    assert_eq!(approved["admin_approval"], "Approved");

    let (status, denied) =
        send_json(&app, "POST", &format!("/api/candidates/{}/deny", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(denied["pipeline_status"], "Denied");
    assert_eq!(denied["admin_approval"], "Denied");
    assert!(timestamp(&denied["updated_at"]) > timestamp(&denied["created_at"]));

    // No ordering is enforced: a denied candidate may re-enter the pipeline.
    let (status, reopened) = send_json(
        &app,
        "PUT",
        &format!("/api/candidates/{}", id),
        Some(json!({ "pipeline_status": "Applied" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reopened["pipeline_status"], "Applied");
    assert_eq!(reopened["admin_approval"], "Denied");
}

#[tokio::test]
async fn list_candidates_combines_both_filters() {
    let app = setup_app().await;

    for (i, email) in ["a@x.com", "b@x.com", "c@x.com"].iter().enumerate() {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "first_name": format!("F{}", i), "last_name": "L", "email": email })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, listed) = send_json(&app, "GET", "/api/candidates", None).await;
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);

    // Move one candidate to Interviewing and approve another.
    send_json(
        &app,
        "PUT",
        &format!("/api/candidates/{}", ids[0]),
        Some(json!({ "pipeline_status": "Interviewing" })),
    )
    .await;
    send_json(
        &app,
        "POST",
        &format!("/api/candidates/{}/approve", ids[1]),
        None,
    )
    .await;

    let (status, filtered) = send_json(
        &app,
        "GET",
        "/api/candidates?pipeline_status=Interviewing&admin_approval=Pending",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"].as_i64().unwrap(), ids[0]);

    let (status, _) = send_json(
        &app,
        "GET",
        "/api/candidates?pipeline_status=Bogus",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_candidate_is_unconditional() {
    let app = setup_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "first_name": "A", "last_name": "B", "email": "a@b.com" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        send_json(&app, "DELETE", &format!("/api/candidates/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Candidate deleted successfully");

    let (status, _) = send_json(&app, "GET", &format!("/api/candidates/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        send_json(&app, "DELETE", &format!("/api/candidates/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pipeline_stats_partition_both_axes() {
    let app = setup_app().await;

    for email in ["a@x.com", "b@x.com", "c@x.com", "d@x.com"] {
        send_json(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "first_name": "F", "last_name": "L", "email": email })),
        )
        .await;
    }
    let (_, listed) = send_json(&app, "GET", "/api/candidates", None).await;
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();

    send_json(
        &app,
        "PUT",
        &format!("/api/candidates/{}", ids[0]),
        Some(json!({ "pipeline_status": "Offered" })),
    )
    .await;
    send_json(
        &app,
        "POST",
        &format!("/api/candidates/{}/approve", ids[1]),
        None,
    )
    .await;
    send_json(
        &app,
        "POST",
        &format!("/api/candidates/{}/deny", ids[2]),
        None,
    )
    .await;

    let (status, stats) =
        send_json(&app, "GET", "/api/candidates/pipeline-stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["pipeline_status"]["applied"], 1);
    assert_eq!(stats["pipeline_status"]["offered"], 1);
    assert_eq!(stats["pipeline_status"]["approved"], 1);
    assert_eq!(stats["pipeline_status"]["denied"], 1);
    assert_eq!(stats["admin_approval"]["pending"], 2);
    assert_eq!(stats["admin_approval"]["approved"], 1);
    assert_eq!(stats["admin_approval"]["denied"], 1);
}
