use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Position of a candidate in the hiring workflow. Stored as TEXT using the
/// variant name; unknown inbound values are rejected before they reach the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PipelineStatus {
    Applied,
    Interviewing,
    Offered,
    Approved,
    Denied,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Applied => "Applied",
            PipelineStatus::Interviewing => "Interviewing",
            PipelineStatus::Offered => "Offered",
            PipelineStatus::Approved => "Approved",
            PipelineStatus::Denied => "Denied",
        }
    }
}

impl FromStr for PipelineStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(PipelineStatus::Applied),
            "Interviewing" => Ok(PipelineStatus::Interviewing),
            "Offered" => Ok(PipelineStatus::Offered),
            "Approved" => Ok(PipelineStatus::Approved),
            "Denied" => Ok(PipelineStatus::Denied),
            other => Err(Error::BadRequest(format!(
                "Unknown pipeline status: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrator accept/reject decision, independent of pipeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum AdminApproval {
    Pending,
    Approved,
    Denied,
}

impl AdminApproval {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminApproval::Pending => "Pending",
            AdminApproval::Approved => "Approved",
            AdminApproval::Denied => "Denied",
        }
    }
}

impl FromStr for AdminApproval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AdminApproval::Pending),
            "Approved" => Ok(AdminApproval::Approved),
            "Denied" => Ok(AdminApproval::Denied),
            other => Err(Error::BadRequest(format!(
                "Unknown admin approval: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AdminApproval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
    pub pipeline_status: PipelineStatus,
    pub admin_approval: AdminApproval,
    pub indeed_registration_id: Option<String>,
    pub ats_candidate_id: Option<String>,
    pub ats_application_id: Option<String>,
    pub indeed_status: Option<String>,
    pub last_sync_timestamp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    /// A candidate with a registration id is known to the external ATS.
    pub fn is_externally_linked(&self) -> bool {
        self.indeed_registration_id.is_some()
    }
}
