use async_trait::async_trait;

use crate::application::{AppResult, FeatureFlags};
use crate::infrastructure::static_feature_flags::StaticFeatureFlags;

/// Local overrides first, then the remote service if one is configured.
pub struct CompositeFeatureFlags {
    overrides: StaticFeatureFlags,
    remote: Option<Box<dyn FeatureFlags>>,
}

impl CompositeFeatureFlags {
    pub fn new(overrides: StaticFeatureFlags, remote: Option<Box<dyn FeatureFlags>>) -> Self {
        Self { overrides, remote }
    }
}

#[async_trait]
impl FeatureFlags for CompositeFeatureFlags {
    async fn get_feature_meta(&self, feature: &str) -> AppResult<String> {
        match &self.remote {
            Some(remote) if !self.overrides.contains(feature) => {
                remote.get_feature_meta(feature).await
            }
            _ => self.overrides.get_feature_meta(feature).await,
        }
    }
}
