use std::sync::Arc;

use crate::application::usecases::{
    GetCooldownConfigUseCase, HandoffOutcome, ReplaceWithSettingsWindowUseCase,
    UpdateCooldownUseCase,
};
use crate::application::{
    Analytics, AppResult, ClickFuture, ClickHandler, ErrorEntry, ErrorLog, FeatureFlags,
    PromptView, Storage, WindowManager,
};
use crate::domain::{AnalyticsEvent, CooldownConfig, CooldownKind, PromptState, ReadyState};

pub const TRANSLATE_SELECTOR: &str = ".translate";
pub const FTE_ELEMENT_ID: &str = "local-file-animated-fte";
pub const FTE_BACKGROUND_IMAGE: &str = "url(../../images/LocalizedFte/en_US/fte_old.svg)";
pub const CONTINUE_BUTTON_ID: &str = "localFilePromptContinueButton";

/// What one click did.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickReport {
    pub config: CooldownConfig,
    pub cooldown: Option<PromptState>,
    pub handoff: HandoffOutcome,
}

/// The "go to settings" button action.
///
/// Holds no reference to the view, so the listener the view keeps does not
/// keep the view alive.
#[derive(Clone)]
pub struct SettingsClickHandler {
    pub storage: Arc<dyn Storage>,
    pub flags: Arc<dyn FeatureFlags>,
    pub windows: Arc<dyn WindowManager>,
    pub analytics: Arc<dyn Analytics>,
    pub errors: Arc<dyn ErrorLog>,
    pub settings_url: Arc<str>,
}

impl SettingsClickHandler {
    /// Analytics, cooldown config, cooldown update, then window handoff.
    ///
    /// The cooldown update does not gate the handoff; each step logs its own
    /// failures.
    pub async fn handle_click(&self) -> ClickReport {
        self.analytics.send(AnalyticsEvent::LocalFteGoToSettingsClicked);

        let config = GetCooldownConfigUseCase {
            flags: self.flags.as_ref(),
        }
        .execute()
        .await;

        let cooldown = UpdateCooldownUseCase {
            storage: self.storage.as_ref(),
            errors: self.errors.as_ref(),
            kind: CooldownKind::Settings,
        }
        .execute(&config)
        .await;

        let handoff = ReplaceWithSettingsWindowUseCase {
            storage: self.storage.as_ref(),
            windows: self.windows.as_ref(),
            errors: self.errors.as_ref(),
            settings_url: &self.settings_url,
        }
        .execute()
        .await;

        ClickReport {
            config,
            cooldown,
            handoff,
        }
    }

    /// Click listener: every click runs as its own task, and a task that dies
    /// is logged instead of reaching the page.
    pub fn listener(&self) -> ClickHandler {
        let handler = self.clone();
        Arc::new(move || -> ClickFuture {
            let handler = handler.clone();
            Box::pin(async move {
                let errors = handler.errors.clone();
                let task = tokio::spawn(async move {
                    handler.handle_click().await;
                });
                if let Err(e) = task.await {
                    errors.log_error(ErrorEntry::new(format!(
                        "handleSettingsButtonCLick: Error in button click handler: {e}"
                    )));
                }
            })
        })
    }
}

/// Drives the prompt page: initialization once the document is ready, then
/// the continue button.
pub struct PromptController {
    pub view: Arc<dyn PromptView>,
    pub click: SettingsClickHandler,
}

impl PromptController {
    /// Runs [`init`](Self::init) now, or after the ready signal if the
    /// document is still loading.
    pub async fn mount(&self) {
        if self.view.ready_state() == ReadyState::Loading {
            self.view.ready().await;
        }
        self.init().await;
    }

    /// Never fails; problems are logged.
    pub async fn init(&self) {
        match self.try_init().await {
            Ok(()) => tracing::info!("local file prompt initialized"),
            Err(e) => self.click.errors.log_error(ErrorEntry::new(format!(
                "initialize: Error in initialization: {e}"
            ))),
        }
    }

    async fn try_init(&self) -> AppResult<()> {
        self.view.translate_elements(TRANSLATE_SELECTOR)?;

        if !self.view.set_background_image(FTE_ELEMENT_ID, FTE_BACKGROUND_IMAGE) {
            self.click
                .errors
                .log_error(ErrorEntry::message_only("initialize: FTE element not found"));
        }

        self.view
            .add_click_listener(CONTINUE_BUTTON_ID, self.click.listener())?;
        self.click.storage.init().await?;
        Ok(())
    }

    pub async fn handle_click(&self) -> ClickReport {
        self.click.handle_click().await
    }
}
