use chrono::{DateTime, Utc};

use crate::application::usecases::GetCooldownConfigUseCase;
use crate::application::{AppResult, FeatureFlags, RecordStore, Storage};
use crate::domain::{LOCAL_FILE_CONFIG, should_show_prompt};

/// Answers whether the local file prompt may be shown again.
pub struct CheckEligibilityUseCase<'a> {
    pub storage: &'a dyn Storage,
    pub flags: &'a dyn FeatureFlags,
}

impl<'a> CheckEligibilityUseCase<'a> {
    pub async fn execute(&self) -> AppResult<bool> {
        self.execute_at(Utc::now()).await
    }

    pub async fn execute_at(&self, now: DateTime<Utc>) -> AppResult<bool> {
        let config = GetCooldownConfigUseCase { flags: self.flags }.execute().await;
        let state = RecordStore::new(self.storage).get(&LOCAL_FILE_CONFIG).await?;
        Ok(should_show_prompt(state.as_ref(), &config, now))
    }
}
