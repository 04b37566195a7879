use std::marker::PhantomData;

use super::{PromptState, SettingsWindowRecord, WindowDescriptor};

/// A storage key bound to the record type stored under it.
pub struct RecordKey<T> {
    name: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for RecordKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordKey<T> {}

pub const LOCAL_FILE_CONFIG: RecordKey<PromptState> = RecordKey::new("localFileConfig");
/// Written by the FTE popup when it opens; only read here.
pub const LOCAL_FTE_WINDOW: RecordKey<WindowDescriptor> = RecordKey::new("localFteWindow");
pub const SETTINGS_WINDOW: RecordKey<SettingsWindowRecord> = RecordKey::new("settingsWindow");
