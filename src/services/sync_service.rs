use crate::dto::sync_dto::{AtsCandidateRecord, SyncReport, SyncStatusReport};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::services::ats_client::AtsClient;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::{info, warn};

/// Reconciles the candidate store with the external ATS in both directions.
#[derive(Clone)]
pub struct SyncService {
    pool: SqlitePool,
    ats: Arc<dyn AtsClient>,
}

impl SyncService {
    pub fn new(pool: SqlitePool, ats: Arc<dyn AtsClient>) -> Self {
        Self { pool, ats }
    }

    pub async fn fetch_batch(&self) -> Result<Vec<AtsCandidateRecord>> {
        self.ats.fetch_candidates().await
    }

    /// Upserts a batch of external records keyed by registration id. The
    /// whole batch commits or rolls back as one unit.
    pub async fn sync_candidates(&self, batch: Vec<AtsCandidateRecord>) -> Result<SyncReport> {
        let mut tx = self.pool.begin().await?;
        let mut synced = Vec::with_capacity(batch.len());

        for record in &batch {
            let now = Utc::now();
            let existing = sqlx::query_as::<_, Candidate>(
                "SELECT * FROM candidates WHERE indeed_registration_id = ?",
            )
            .bind(&record.indeed_registration_id)
            .fetch_optional(&mut *tx)
            .await?;

            let candidate = match existing {
                Some(c) => merge_record(&mut tx, c.id, record, now).await?,
                None => match insert_record(&mut tx, record, now).await {
                    Ok(c) => c,
                    Err(Error::Conflict(_)) => {
                        // Lost an insert race on the registration id; fall
                        // back to the update path.
                        warn!(
                            "Registration id {} already present, updating instead",
                            record.indeed_registration_id
                        );
                        let c = sqlx::query_as::<_, Candidate>(
                            "SELECT * FROM candidates WHERE indeed_registration_id = ?",
                        )
                        .bind(&record.indeed_registration_id)
                        .fetch_optional(&mut *tx)
                        .await?
                        .ok_or_else(|| {
                            Error::Conflict(format!(
                                "Candidate {} conflicts with an existing record",
                                record.email
                            ))
                        })?;
                        merge_record(&mut tx, c.id, record, now).await?
                    }
                    Err(e) => return Err(e),
                },
            };
            synced.push(candidate);
        }

        tx.commit().await?;

        info!("Synced {} candidates from the ATS", synced.len());
        Ok(SyncReport {
            message: format!(
                "Successfully synced {} candidates from the ATS",
                synced.len()
            ),
            synced_count: synced.len(),
            synced_candidates: synced,
        })
    }

    /// Reports the candidate's local pipeline status to the ATS, then records
    /// the push locally. The local row is only touched once the ATS has
    /// acknowledged the update.
    pub async fn push_candidate_status(&self, candidate_id: i64) -> Result<Candidate> {
        let candidate =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = ?")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let registration_id = candidate
            .indeed_registration_id
            .clone()
            .ok_or_else(|| Error::NotLinked("Candidate is not synced with the ATS".to_string()))?;

        self.ats
            .push_status(&registration_id, candidate.pipeline_status)
            .await?;

        let now = Utc::now();
        let updated = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET indeed_status = ?, last_sync_timestamp = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(candidate.pipeline_status.as_str())
        .bind(now)
        .bind(now)
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Pushed status {} for candidate {} to the ATS",
            updated.pipeline_status, candidate_id
        );
        Ok(updated)
    }

    pub async fn sync_status(&self) -> Result<SyncStatusReport> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        let synced: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM candidates WHERE indeed_registration_id IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        let last_sync_time: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT last_sync_timestamp FROM candidates
            WHERE last_sync_timestamp IS NOT NULL
            ORDER BY last_sync_timestamp DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(SyncStatusReport {
            total_candidates: total,
            synced_candidates: synced,
            sync_percentage: (synced as f64 / total.max(1) as f64) * 100.0,
            last_sync_time,
            ats_configured: self.ats.is_configured(),
        })
    }
}

/// Merge only sync-scoped fields into an existing row. Local profile edits
/// (name, email, phone) are never overwritten by inbound data.
async fn merge_record(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    record: &AtsCandidateRecord,
    now: DateTime<Utc>,
) -> Result<Candidate> {
    let candidate = sqlx::query_as::<_, Candidate>(
        r#"
        UPDATE candidates
        SET ats_candidate_id = ?, ats_application_id = ?, indeed_status = ?,
            last_sync_timestamp = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&record.ats_candidate_id)
    .bind(&record.ats_application_id)
    .bind(&record.indeed_status)
    .bind(now)
    .bind(now)
    .bind(id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(candidate)
}

async fn insert_record(
    tx: &mut Transaction<'_, Sqlite>,
    record: &AtsCandidateRecord,
    now: DateTime<Utc>,
) -> Result<Candidate> {
    let candidate = sqlx::query_as::<_, Candidate>(
        r#"
        INSERT INTO candidates (first_name, last_name, email, phone,
            pipeline_status, admin_approval, indeed_registration_id, ats_candidate_id,
            ats_application_id, indeed_status, last_sync_timestamp, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'Applied', 'Pending', ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.indeed_registration_id)
    .bind(&record.ats_candidate_id)
    .bind(&record.ats_application_id)
    .bind(&record.indeed_status)
    .bind(now)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(candidate)
}
