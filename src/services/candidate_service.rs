use crate::dto::candidate_dto::{
    ApprovalBreakdown, CreateCandidatePayload, PipelineBreakdown, PipelineStats,
    UpdateCandidatePayload,
};
use crate::error::{Error, Result};
use crate::models::candidate::{AdminApproval, Candidate, PipelineStatus};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
}

impl CandidateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    pub async fn list_candidates(
        &self,
        pipeline_status: Option<PipelineStatus>,
        admin_approval: Option<AdminApproval>,
    ) -> Result<Vec<Candidate>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM candidates WHERE 1=1");
        if let Some(status) = pipeline_status {
            qb.push(" AND pipeline_status = ");
            qb.push_bind(status);
        }
        if let Some(approval) = admin_approval {
            qb.push(" AND admin_approval = ");
            qb.push_bind(approval);
        }
        qb.push(" ORDER BY created_at DESC");

        let candidates = qb
            .build_query_as::<Candidate>()
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    pub async fn create_candidate(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        payload.validate()?;
        let first_name = super::required(payload.first_name, "first_name")?;
        let last_name = super::required(payload.last_name, "last_name")?;
        let email = super::required(payload.email, "email")?;

        let pipeline_status = match payload.pipeline_status.as_deref() {
            Some(s) => s.parse::<PipelineStatus>()?,
            None => PipelineStatus::Applied,
        };
        let admin_approval = match payload.admin_approval.as_deref() {
            Some(s) => s.parse::<AdminApproval>()?,
            None => AdminApproval::Pending,
        };

        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM candidates WHERE email = ?")
            .bind(&email)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "A candidate with this email address already exists.".to_string(),
            ));
        }

        if let Some(ref registration_id) = payload.indeed_registration_id {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT id FROM candidates WHERE indeed_registration_id = ?")
                    .bind(registration_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if exists.is_some() {
                return Err(Error::Conflict(
                    "A candidate with this registration id already exists.".to_string(),
                ));
            }
        }

        let now = Utc::now();
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (first_name, last_name, email, phone, resume_path,
                pipeline_status, admin_approval, indeed_registration_id, ats_candidate_id,
                ats_application_id, indeed_status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&payload.phone)
        .bind(&payload.resume_path)
        .bind(pipeline_status)
        .bind(admin_approval)
        .bind(&payload.indeed_registration_id)
        .bind(&payload.ats_candidate_id)
        .bind(&payload.ats_application_id)
        .bind(&payload.indeed_status)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        info!("Created candidate {} ({})", candidate.id, candidate.email);
        Ok(candidate)
    }

    pub async fn update_candidate(
        &self,
        id: i64,
        payload: UpdateCandidatePayload,
    ) -> Result<Candidate> {
        payload.validate()?;

        let mut tx = self.pool.begin().await?;
        let mut candidate =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        if let Some(v) = payload.first_name {
            candidate.first_name = v;
        }
        if let Some(v) = payload.last_name {
            candidate.last_name = v;
        }
        if let Some(v) = payload.email {
            candidate.email = v;
        }
        if let Some(v) = payload.phone {
            candidate.phone = Some(v);
        }
        if let Some(v) = payload.resume_path {
            candidate.resume_path = Some(v);
        }
        if let Some(v) = payload.pipeline_status {
            candidate.pipeline_status = v.parse()?;
        }
        if let Some(v) = payload.admin_approval {
            candidate.admin_approval = v.parse()?;
        }
        if let Some(v) = payload.indeed_registration_id {
            candidate.indeed_registration_id = Some(v);
        }
        if let Some(v) = payload.ats_candidate_id {
            candidate.ats_candidate_id = Some(v);
        }
        if let Some(v) = payload.ats_application_id {
            candidate.ats_application_id = Some(v);
        }
        if let Some(v) = payload.indeed_status {
            candidate.indeed_status = Some(v);
        }

        let now = Utc::now();
        let updated = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET first_name = ?, last_name = ?, email = ?, phone = ?, resume_path = ?,
                pipeline_status = ?, admin_approval = ?, indeed_registration_id = ?,
                ats_candidate_id = ?, ats_application_id = ?, indeed_status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.resume_path)
        .bind(candidate.pipeline_status)
        .bind(candidate.admin_approval)
        .bind(&candidate.indeed_registration_id)
        .bind(&candidate.ats_candidate_id)
        .bind(&candidate.ats_application_id)
        .bind(&candidate.indeed_status)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn delete_candidate(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        info!("Deleted candidate {}", id);
        Ok(())
    }

    pub async fn approve_candidate(&self, id: i64) -> Result<Candidate> {
        self.set_decision(id, AdminApproval::Approved, PipelineStatus::Approved)
            .await
    }

    pub async fn deny_candidate(&self, id: i64) -> Result<Candidate> {
        self.set_decision(id, AdminApproval::Denied, PipelineStatus::Denied)
            .await
    }

    /// Approve/deny set both status axes to the matching terminal value in a
    /// single statement.
    async fn set_decision(
        &self,
        id: i64,
        approval: AdminApproval,
        status: PipelineStatus,
    ) -> Result<Candidate> {
        let now = Utc::now();
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET admin_approval = ?, pipeline_status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(approval)
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        info!("Candidate {} marked {}", id, approval);
        Ok(candidate)
    }

    pub async fn pipeline_stats(&self) -> Result<PipelineStats> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;

        let mut pipeline = PipelineBreakdown {
            applied: 0,
            interviewing: 0,
            offered: 0,
            approved: 0,
            denied: 0,
        };
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT pipeline_status, COUNT(*) FROM candidates GROUP BY pipeline_status",
        )
        .fetch_all(&self.pool)
        .await?;
        for (status, count) in rows {
            match status.as_str() {
                "Applied" => pipeline.applied = count,
                "Interviewing" => pipeline.interviewing = count,
                "Offered" => pipeline.offered = count,
                "Approved" => pipeline.approved = count,
                "Denied" => pipeline.denied = count,
                _ => {}
            }
        }

        let mut approval = ApprovalBreakdown {
            pending: 0,
            approved: 0,
            denied: 0,
        };
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT admin_approval, COUNT(*) FROM candidates GROUP BY admin_approval",
        )
        .fetch_all(&self.pool)
        .await?;
        for (status, count) in rows {
            match status.as_str() {
                "Pending" => approval.pending = count,
                "Approved" => approval.approved = count,
                "Denied" => approval.denied = count,
                _ => {}
            }
        }

        Ok(PipelineStats {
            total,
            pipeline_status: pipeline,
            admin_approval: approval,
        })
    }
}
