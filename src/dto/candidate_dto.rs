use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCandidatePayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
    pub pipeline_status: Option<String>,
    pub admin_approval: Option<String>,
    pub indeed_registration_id: Option<String>,
    pub ats_candidate_id: Option<String>,
    pub ats_application_id: Option<String>,
    pub indeed_status: Option<String>,
}

/// Partial update: fields absent from the payload are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
    pub pipeline_status: Option<String>,
    pub admin_approval: Option<String>,
    pub indeed_registration_id: Option<String>,
    pub ats_candidate_id: Option<String>,
    pub ats_application_id: Option<String>,
    pub indeed_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateFilter {
    pub pipeline_status: Option<String>,
    pub admin_approval: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineBreakdown {
    pub applied: i64,
    pub interviewing: i64,
    pub offered: i64,
    pub approved: i64,
    pub denied: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalBreakdown {
    pub pending: i64,
    pub approved: i64,
    pub denied: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub total: i64,
    pub pipeline_status: PipelineBreakdown,
    pub admin_approval: ApprovalBreakdown,
}
