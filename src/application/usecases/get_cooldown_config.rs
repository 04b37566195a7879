use serde_json::Value;

use crate::application::{AppError, AppResult, FeatureFlags};
use crate::domain::CooldownConfig;

/// Feature carrying the prompt's cooldown settings.
pub const LOCAL_FILE_PROMPT_FEATURE: &str = "dc-cv-local-file-permission-prompt";

pub struct GetCooldownConfigUseCase<'a> {
    pub flags: &'a dyn FeatureFlags,
}

impl<'a> GetCooldownConfigUseCase<'a> {
    /// Single attempt; any failure yields [`CooldownConfig::fallback`].
    pub async fn execute(&self) -> CooldownConfig {
        match self.fetch().await {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::debug!(error = %e, "cooldown config unavailable, using fallback");
                CooldownConfig::fallback()
            }
        }
    }

    async fn fetch(&self) -> AppResult<CooldownConfig> {
        let raw = self
            .flags
            .get_feature_meta(LOCAL_FILE_PROMPT_FEATURE)
            .await?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::FeatureFlag(format!("malformed {LOCAL_FILE_PROMPT_FEATURE}: {e}"))
        })?;
        if !value.is_object() {
            return Err(AppError::FeatureFlag(format!(
                "{LOCAL_FILE_PROMPT_FEATURE} is not an object"
            )));
        }
        serde_json::from_value(value)
            .map_err(|e| AppError::FeatureFlag(format!("malformed {LOCAL_FILE_PROMPT_FEATURE}: {e}")))
    }
}
