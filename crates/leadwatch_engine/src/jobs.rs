use leadwatch_logging::watch_info;

use crate::client::{check_status, map_reqwest_error};
use crate::{AgentRunAck, AgentRunRequest, ApiClient, ApiError, EnrichmentOutcome, LeadRecord};

/// Control surface of the job host.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Runs the manager enrichment for a lead. Resolves when the job finishes.
    async fn start_enrichment(&self, lead_id: &str) -> Result<EnrichmentOutcome, ApiError>;

    /// Hands a verification code to a job blocked on one.
    async fn submit_verification_code(&self, code: &str) -> Result<(), ApiError>;

    /// Starts a lead-generation agent run in the background.
    async fn run_agent(&self, request: &AgentRunRequest) -> Result<AgentRunAck, ApiError>;

    /// Reloads a lead record from the record store.
    async fn fetch_lead(&self, lead_id: &str) -> Result<LeadRecord, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    api: ApiClient,
}

impl ReqwestJobApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn start_enrichment(&self, lead_id: &str) -> Result<EnrichmentOutcome, ApiError> {
        let url = self.api.endpoint(&["leads", lead_id, "enrich-managers"])?;
        watch_info!("Sending enrichment request for {}", lead_id);
        let response = self
            .api
            .http()
            .post(url)
            .timeout(self.api.settings().job_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn submit_verification_code(&self, code: &str) -> Result<(), ApiError> {
        let url = self.api.endpoint(&["submit-2fa"])?;
        let response = self
            .api
            .http()
            .post(url)
            .timeout(self.api.settings().feed_timeout)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn run_agent(&self, request: &AgentRunRequest) -> Result<AgentRunAck, ApiError> {
        let url = self.api.endpoint(&["run-agent"])?;
        let response = self
            .api
            .http()
            .post(url)
            .timeout(self.api.settings().job_timeout)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn fetch_lead(&self, lead_id: &str) -> Result<LeadRecord, ApiError> {
        let url = self.api.endpoint(&["leads", lead_id])?;
        let response = self
            .api
            .http()
            .get(url)
            .timeout(self.api.settings().feed_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response.json().await.map_err(map_reqwest_error)
    }
}
