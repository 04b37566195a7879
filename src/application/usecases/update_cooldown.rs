use chrono::{DateTime, Utc};

use crate::application::{AppResult, ErrorEntry, ErrorLog, RecordStore, Storage};
use crate::domain::{
    CooldownConfig, CooldownKind, INVALID_DATE, LOCAL_FILE_CONFIG, PromptState,
    eligible_date_after, to_iso_string,
};

/// Pushes the prompt's eligibility date forward by the configured cooldown.
pub struct UpdateCooldownUseCase<'a> {
    pub storage: &'a dyn Storage,
    pub errors: &'a dyn ErrorLog,
    pub kind: CooldownKind,
}

impl<'a> UpdateCooldownUseCase<'a> {
    /// Returns the record as written, or `None` when it could not be
    /// persisted. Failures are logged, never returned.
    pub async fn execute(&self, config: &CooldownConfig) -> Option<PromptState> {
        self.execute_at(config, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        config: &CooldownConfig,
        now: DateTime<Utc>,
    ) -> Option<PromptState> {
        match self.update(config, now).await {
            Ok(state) => {
                tracing::debug!(
                    eligible_date = state.eligible_date.as_deref().unwrap_or_default(),
                    "prompt cooldown updated"
                );
                Some(state)
            }
            Err(e) => {
                self.errors.log_error(ErrorEntry::new(format!(
                    "_updateLocalFilePromptCooldown: Error updating local file prompt cooldown: {e}"
                )));
                None
            }
        }
    }

    async fn update(&self, config: &CooldownConfig, now: DateTime<Utc>) -> AppResult<PromptState> {
        // the date is only computed once the record has been read
        RecordStore::new(self.storage)
            .update(&LOCAL_FILE_CONFIG, PromptState::first_prompt, |state| {
                state.eligible_date = Some(self.eligible_date(config, now));
            })
            .await
    }

    // A bad cooldown is reported but still produces a (degraded) date so the
    // record is written regardless.
    fn eligible_date(&self, config: &CooldownConfig, now: DateTime<Utc>) -> String {
        let raw = config.cooldown(self.kind);
        let days = raw.to_number();
        if !days.is_finite() {
            self.errors.log_error(ErrorEntry::new(format!(
                "_getLocalFilePromptCooldown: cooldownConfig.{} must be a valid number: {raw}",
                self.kind.field_name()
            )));
        }

        match eligible_date_after(now, days) {
            Some(date) => to_iso_string(date),
            None => {
                if days.is_finite() {
                    self.errors.log_error(ErrorEntry::new(format!(
                        "_getLocalFilePromptCooldown: eligible date out of range for {}: {raw}",
                        self.kind.field_name()
                    )));
                }
                INVALID_DATE.to_string()
            }
        }
    }
}
