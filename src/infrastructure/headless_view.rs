use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::usecases::prompt_controller::{CONTINUE_BUTTON_ID, FTE_ELEMENT_ID};
use crate::application::{AppError, AppResult, ClickHandler, PromptView};
use crate::domain::ReadyState;

/// A DOM stand-in: a set of element ids plus the listeners and styles applied
/// to them. Clones share state.
#[derive(Clone)]
pub struct HeadlessView {
    inner: Arc<Mutex<Inner>>,
    ready_tx: Arc<watch::Sender<ReadyState>>,
}

#[derive(Default)]
struct Inner {
    elements: HashSet<String>,
    translated: Vec<String>,
    backgrounds: HashMap<String, String>,
    listeners: HashMap<String, Vec<ClickHandler>>,
}

impl HeadlessView {
    pub fn new<I, S>(ready_state: ReadyState, element_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (ready_tx, _) = watch::channel(ready_state);
        let inner = Inner {
            elements: element_ids.into_iter().map(Into::into).collect(),
            ..Inner::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            ready_tx: Arc::new(ready_tx),
        }
    }

    /// The prompt page as shipped: FTE image element and continue button.
    pub fn prompt_page(ready_state: ReadyState) -> Self {
        Self::new(ready_state, [FTE_ELEMENT_ID, CONTINUE_BUTTON_ID])
    }

    /// Fires the ready signal.
    pub fn finish_loading(&self) {
        self.ready_tx.send_replace(ReadyState::Complete);
    }

    /// Dispatches a click to every listener on `element_id`, each as its own
    /// task. The handles are only needed by callers that want to wait.
    pub fn click(&self, element_id: &str) -> AppResult<Vec<JoinHandle<()>>> {
        let handlers = {
            let inner = self.lock()?;
            if !inner.elements.contains(element_id) {
                return Err(AppError::View(format!("element {element_id} not found")));
            }
            inner.listeners.get(element_id).cloned().unwrap_or_default()
        };
        Ok(handlers.into_iter().map(|h| tokio::spawn(h())).collect())
    }

    pub fn listener_count(&self, element_id: &str) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.listeners.get(element_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn background_of(&self, element_id: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.backgrounds.get(element_id).cloned())
    }

    pub fn translated_selectors(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.translated.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::View("lock poisoned".into()))
    }
}

#[async_trait]
impl PromptView for HeadlessView {
    fn ready_state(&self) -> ReadyState {
        *self.ready_tx.borrow()
    }

    async fn ready(&self) {
        let mut rx = self.ready_tx.subscribe();
        // the sender lives as long as self, so this only ends on a state change
        let _ = rx.wait_for(|s| *s != ReadyState::Loading).await;
    }

    fn translate_elements(&self, selector: &str) -> AppResult<()> {
        self.lock()?.translated.push(selector.to_string());
        Ok(())
    }

    fn set_background_image(&self, element_id: &str, url: &str) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        if !inner.elements.contains(element_id) {
            return false;
        }
        inner
            .backgrounds
            .insert(element_id.to_string(), url.to_string());
        true
    }

    fn add_click_listener(&self, element_id: &str, handler: ClickHandler) -> AppResult<()> {
        let mut inner = self.lock()?;
        if !inner.elements.contains(element_id) {
            return Err(AppError::View(format!("element {element_id} not found")));
        }
        inner
            .listeners
            .entry(element_id.to_string())
            .or_default()
            .push(handler);
        Ok(())
    }
}
