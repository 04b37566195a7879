pub mod check_eligibility;
pub mod get_cooldown_config;
pub mod prompt_controller;
pub mod replace_with_settings_window;
pub mod update_cooldown;

pub use check_eligibility::CheckEligibilityUseCase;
pub use get_cooldown_config::GetCooldownConfigUseCase;
pub use prompt_controller::{ClickReport, PromptController, SettingsClickHandler};
pub use replace_with_settings_window::{HandoffOutcome, ReplaceWithSettingsWindowUseCase};
pub use update_cooldown::UpdateCooldownUseCase;
