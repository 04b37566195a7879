use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::{AppError, AppResult, FeatureFlags};

/// Feature payloads fixed at startup (config overrides, offline runs).
#[derive(Clone, Debug, Default)]
pub struct StaticFeatureFlags {
    features: HashMap<String, String>,
}

impl StaticFeatureFlags {
    pub fn new(features: HashMap<String, String>) -> Self {
        Self { features }
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains_key(feature)
    }
}

#[async_trait]
impl FeatureFlags for StaticFeatureFlags {
    async fn get_feature_meta(&self, feature: &str) -> AppResult<String> {
        self.features
            .get(feature)
            .cloned()
            .ok_or_else(|| AppError::FeatureFlag(format!("feature {feature} not available")))
    }
}
