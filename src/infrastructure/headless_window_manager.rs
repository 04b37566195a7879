use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::{AppError, AppResult, WindowManager};
use crate::domain::{CreateWindowOptions, TabHandle, WindowDescriptor, WindowHandle, WindowId};

/// URL recorded for windows adopted from the host, whose page is unknown.
pub const BLANK_URL: &str = "about:blank";

/// Window manager without a screen: tracks open windows and prints what a
/// browser would do.
#[derive(Clone)]
pub struct HeadlessWindowManager {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    next_window_id: WindowId,
    next_tab_id: i64,
    open: BTreeMap<WindowId, CreateWindowOptions>,
}

impl HeadlessWindowManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_window_id: 1,
                next_tab_id: 100,
                open: BTreeMap::new(),
            })),
        }
    }

    /// Registers a window the host already has open (e.g. the FTE popup).
    pub fn adopt(&self, descriptor: &WindowDescriptor, url: &str) -> AppResult<()> {
        let mut inner = self.lock()?;
        inner.open.insert(
            descriptor.id,
            CreateWindowOptions::popup_at(descriptor, url),
        );
        inner.next_window_id = inner.next_window_id.max(descriptor.id + 1);
        Ok(())
    }

    pub fn open_windows(&self) -> Vec<WindowId> {
        self.inner
            .lock()
            .map(|inner| inner.open.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn url_of(&self, id: WindowId) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.open.get(&id).map(|opts| opts.url.clone()))
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Window("lock poisoned".into()))
    }
}

impl Default for HeadlessWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowManager for HeadlessWindowManager {
    async fn create_window(&self, options: &CreateWindowOptions) -> AppResult<WindowHandle> {
        if options.url.is_empty() {
            return Err(AppError::Window("window url is empty".into()));
        }
        let mut inner = self.lock()?;
        let id = inner.next_window_id;
        let tab_id = inner.next_tab_id;
        inner.next_window_id += 1;
        inner.next_tab_id += 1;
        inner.open.insert(id, options.clone());

        println!(
            "WINDOW OPEN: id={} type={} {}x{} at ({},{}) url={}",
            id,
            options.window_type,
            options.width,
            options.height,
            options.left,
            options.top,
            options.url
        );

        Ok(WindowHandle {
            id,
            tabs: vec![TabHandle { id: tab_id }],
        })
    }

    async fn close_window(&self, id: WindowId) -> AppResult<()> {
        let mut inner = self.lock()?;
        if inner.open.remove(&id).is_none() {
            return Err(AppError::Window(format!("no window with id {id}")));
        }
        println!("WINDOW CLOSE: id={id}");
        Ok(())
    }
}
