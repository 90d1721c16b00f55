use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::ClientConfig,
    error::{AnalysisError, ConfigError, Result},
    types::{AnalyzeRequest, ApiErrorBody, HealthStatus, VideoAnalysis},
};

/// The two backend endpoints the page consumes.
#[async_trait]
pub trait AnalysisApi: Send + Sync + 'static {
    async fn health(&self) -> Result<HealthStatus>;
    async fn analyze(&self, video_url: &str) -> Result<VideoAnalysis>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl AnalysisApi for ApiClient {
    async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .http
            .get(self.config.endpoint("/api/health"))
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(AnalysisError::MalformedResponse)
    }

    async fn analyze(&self, video_url: &str) -> Result<VideoAnalysis> {
        let url = self.config.endpoint("/api/analyze");
        tracing::debug!(%url, video_url, "sending analysis request");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&AnalyzeRequest {
                video_url: video_url.to_string(),
            })
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still counts as an API failure.
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(AnalysisError::Api { status, detail });
        }

        response
            .json::<VideoAnalysis>()
            .await
            .map_err(AnalysisError::MalformedResponse)
    }
}
