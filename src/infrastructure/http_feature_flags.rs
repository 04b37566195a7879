use async_trait::async_trait;

use crate::application::{AppError, AppResult, FeatureFlags};

/// Feature metadata served as `GET {endpoint}/{feature}`; the response body is
/// the feature's JSON payload.
pub struct HttpFeatureFlags {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFeatureFlags {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeatureFlags for HttpFeatureFlags {
    async fn get_feature_meta(&self, feature: &str) -> AppResult<String> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), feature);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::FeatureFlag(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::FeatureFlag(e.to_string()))?;

        resp.text()
            .await
            .map_err(|e| AppError::FeatureFlag(e.to_string()))
    }
}
