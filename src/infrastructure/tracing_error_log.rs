use crate::application::{ErrorEntry, ErrorLog};

/// Reports prompt diagnostics through `tracing` at error level.
pub struct TracingErrorLog;

impl TracingErrorLog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingErrorLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorLog for TracingErrorLog {
    fn log_error(&self, entry: ErrorEntry) {
        match entry.error {
            Some(error) => tracing::error!(error = %error, "{}", entry.message),
            None => tracing::error!("{}", entry.message),
        }
    }
}
