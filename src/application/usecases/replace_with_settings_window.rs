use crate::application::{ErrorEntry, ErrorLog, RecordStore, Storage, WindowManager};
use crate::domain::{
    CreateWindowOptions, LOCAL_FTE_WINDOW, SETTINGS_WINDOW, SettingsWindowRecord, TabId, WindowId,
};

/// Extension site settings page the user is sent to.
pub const LOCAL_FILE_PERMISSION_URL: &str =
    "chrome://settings/content/siteDetails?site=chrome-extension://efaidnbmnnnibpcajpcglclefindmkaj";

/// How far a handoff got.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// Settings window opened and recorded, FTE window closed.
    Replaced {
        settings_tab_id: TabId,
        closed_window_id: WindowId,
    },
    /// Settings window opened and recorded, but closing the FTE window failed.
    OldWindowLingering {
        settings_tab_id: TabId,
        window_id: WindowId,
    },
    /// No remembered FTE window; nothing was opened.
    MissingWindowDescriptor,
    /// The remembered FTE window could not be read.
    DescriptorUnreadable,
    /// The host could not open the settings window; the FTE window stays.
    CreateFailed,
    /// The settings window opened but could not be recorded; the FTE window stays.
    RecordFailed { settings_tab_id: TabId },
}

/// Replaces the FTE popup with a settings window at the same position.
///
/// The new window is recorded before the old one is closed, so an
/// interruption in between leaves a stale FTE window rather than an
/// untracked settings window. Not meant to run twice per prompt cycle.
pub struct ReplaceWithSettingsWindowUseCase<'a> {
    pub storage: &'a dyn Storage,
    pub windows: &'a dyn WindowManager,
    pub errors: &'a dyn ErrorLog,
    pub settings_url: &'a str,
}

impl<'a> ReplaceWithSettingsWindowUseCase<'a> {
    pub async fn execute(&self) -> HandoffOutcome {
        let records = RecordStore::new(self.storage);

        let descriptor = match records.get(&LOCAL_FTE_WINDOW).await {
            Ok(Some(d)) => d,
            Ok(None) => {
                self.log(
                    "handleSettingsButtonCLick: Window configuration not found in storage".into(),
                );
                return HandoffOutcome::MissingWindowDescriptor;
            }
            Err(e) => {
                self.log(format!(
                    "handleSettingsButtonCLick: Error reading window configuration: {e}"
                ));
                return HandoffOutcome::DescriptorUnreadable;
            }
        };

        let options = CreateWindowOptions::popup_at(&descriptor, self.settings_url);
        let settings_tab_id = match self.windows.create_window(&options).await {
            Ok(window) => match window.primary_tab() {
                Some(tab) => tab,
                None => {
                    tracing::warn!(window_id = window.id, "settings window has no tab");
                    self.log("handleSettingsButtonCLick: Error creating window".into());
                    return HandoffOutcome::CreateFailed;
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "settings window creation failed");
                self.log("handleSettingsButtonCLick: Error creating window".into());
                return HandoffOutcome::CreateFailed;
            }
        };

        let record = SettingsWindowRecord {
            id: settings_tab_id,
        };
        if let Err(e) = records.put(&SETTINGS_WINDOW, &record).await {
            self.log(format!(
                "handleSettingsButtonCLick: Error saving settings window: {e}"
            ));
            return HandoffOutcome::RecordFailed { settings_tab_id };
        }

        match self.windows.close_window(descriptor.id).await {
            Ok(()) => {
                tracing::info!(
                    settings_tab_id,
                    closed_window_id = descriptor.id,
                    "handed off to settings window"
                );
                HandoffOutcome::Replaced {
                    settings_tab_id,
                    closed_window_id: descriptor.id,
                }
            }
            Err(e) => {
                self.log(format!(
                    "handleSettingsButtonCLick: Error closing window {}: {e}",
                    descriptor.id
                ));
                HandoffOutcome::OldWindowLingering {
                    settings_tab_id,
                    window_id: descriptor.id,
                }
            }
        }
    }

    fn log(&self, detail: String) {
        self.errors.log_error(ErrorEntry::new(detail));
    }
}
