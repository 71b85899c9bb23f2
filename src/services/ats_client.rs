use crate::config::AtsConfig;
use crate::dto::sync_dto::AtsCandidateRecord;
use crate::error::{Error, Result};
use crate::models::candidate::PipelineStatus;
use axum::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

/// Transport to the external ATS. The reconciliation engine only depends on
/// this interface; tests substitute a double.
#[async_trait]
pub trait AtsClient: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Pull the current batch of candidate records from the ATS.
    async fn fetch_candidates(&self) -> Result<Vec<AtsCandidateRecord>>;

    /// Report a candidate's local pipeline status back to the ATS.
    async fn push_status(&self, registration_id: &str, status: PipelineStatus) -> Result<()>;
}

#[derive(Clone)]
pub struct HttpAtsClient {
    client: Client,
    config: AtsConfig,
}

impl HttpAtsClient {
    pub fn new(config: AtsConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client for the ATS");

        if config.is_configured() {
            info!("ATS integration enabled, base URL: {}", config.base_url);
        } else {
            info!("ATS credentials not set, sync will run without authentication");
        }

        Self { client, config }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match (&self.config.client_id, &self.config.client_secret) {
            (Some(id), Some(secret)) => request.basic_auth(id, Some(secret)),
            _ => request,
        }
    }
}

#[async_trait]
impl AtsClient for HttpAtsClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn fetch_candidates(&self) -> Result<Vec<AtsCandidateRecord>> {
        let url = format!("{}/v1/candidates", self.config.base_url);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::SyncFailed(format!("ATS request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SyncFailed(format!("ATS returned status {}", status)));
        }

        response
            .json::<Vec<AtsCandidateRecord>>()
            .await
            .map_err(|e| Error::SyncFailed(format!("Failed to parse ATS candidate list: {}", e)))
    }

    async fn push_status(&self, registration_id: &str, status: PipelineStatus) -> Result<()> {
        let url = format!(
            "{}/v1/candidates/{}/status",
            self.config.base_url, registration_id
        );
        let response = self
            .authorized(self.client.post(&url))
            .json(&json!({ "status": status.as_str() }))
            .send()
            .await
            .map_err(|e| Error::SyncFailed(format!("ATS request failed: {}", e)))?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SyncFailed(format!(
                "ATS rejected status update ({}): {}",
                http_status, body
            )));
        }
        Ok(())
    }
}
