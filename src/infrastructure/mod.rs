pub mod broadcast_analytics;
pub mod composite_feature_flags;
pub mod event_bus;
pub mod headless_view;
pub mod headless_window_manager;
pub mod http_feature_flags;
pub mod memory_store;
pub mod multi_analytics;
pub mod sqlite_store;
pub mod static_feature_flags;
pub mod tracing_analytics;
pub mod tracing_error_log;
