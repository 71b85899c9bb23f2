use crate::models::candidate::Candidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One candidate record as reported by the external ATS, keyed by the
/// registration id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsCandidateRecord {
    pub indeed_registration_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub ats_candidate_id: Option<String>,
    pub ats_application_id: Option<String>,
    pub indeed_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncCandidatesPayload {
    #[serde(default)]
    pub candidates: Vec<AtsCandidateRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub message: String,
    pub synced_count: usize,
    pub synced_candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushStatusPayload {
    pub candidate_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PushStatusReport {
    pub message: String,
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncStatusReport {
    pub total_candidates: i64,
    pub synced_candidates: i64,
    pub sync_percentage: f64,
    pub last_sync_time: Option<DateTime<Utc>>,
    pub ats_configured: bool,
}
