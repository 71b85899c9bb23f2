use crate::dto::sync_dto::{PushStatusPayload, PushStatusReport, SyncCandidatesPayload};
use crate::error::Result;
use crate::AppState;
use axum::{extract::State, Json};

/// Runs an inbound sync. A batch may be supplied in the request body;
/// otherwise the current batch is pulled from the ATS.
pub async fn sync_candidates(
    State(state): State<AppState>,
    payload: Option<Json<SyncCandidatesPayload>>,
) -> Result<impl axum::response::IntoResponse> {
    let batch = match payload {
        Some(Json(p)) if !p.candidates.is_empty() => p.candidates,
        _ => state.sync_service.fetch_batch().await?,
    };
    let report = state.sync_service.sync_candidates(batch).await?;
    Ok(Json(report))
}

pub async fn push_candidate_status(
    State(state): State<AppState>,
    Json(payload): Json<PushStatusPayload>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state
        .sync_service
        .push_candidate_status(payload.candidate_id)
        .await?;
    Ok(Json(PushStatusReport {
        message: "Candidate status pushed to the ATS successfully".to_string(),
        candidate,
    }))
}

pub async fn get_sync_status(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse> {
    let report = state.sync_service.sync_status().await?;
    Ok(Json(report))
}
