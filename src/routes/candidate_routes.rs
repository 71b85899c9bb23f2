use crate::dto::candidate_dto::{CandidateFilter, CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::Result;
use crate::models::candidate::{AdminApproval, PipelineStatus};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub async fn list_candidates(
    State(state): State<AppState>,
    Query(filter): Query<CandidateFilter>,
) -> Result<impl axum::response::IntoResponse> {
    let pipeline_status = filter
        .pipeline_status
        .as_deref()
        .map(str::parse::<PipelineStatus>)
        .transpose()?;
    let admin_approval = filter
        .admin_approval
        .as_deref()
        .map(str::parse::<AdminApproval>)
        .transpose()?;

    let candidates = state
        .candidate_service
        .list_candidates(pipeline_status, admin_approval)
        .await?;
    Ok(Json(candidates))
}

pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state.candidate_service.create_candidate(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state.candidate_service.get_candidate(id).await?;
    match candidate {
        Some(c) => Ok(Json(c)),
        None => Err(crate::error::Error::NotFound("Candidate not found".into())),
    }
}

pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state.candidate_service.update_candidate(id, payload).await?;
    Ok(Json(candidate))
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    state.candidate_service.delete_candidate(id).await?;
    Ok(Json(json!({ "message": "Candidate deleted successfully" })))
}

pub async fn approve_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state.candidate_service.approve_candidate(id).await?;
    Ok(Json(candidate))
}

pub async fn deny_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state.candidate_service.deny_candidate(id).await?;
    Ok(Json(candidate))
}

pub async fn get_pipeline_stats(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse> {
    let stats = state.candidate_service.pipeline_stats().await?;
    Ok(Json(stats))
}
