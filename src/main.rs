use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use local_file_prompt::application::usecases::prompt_controller::CONTINUE_BUTTON_ID;
use local_file_prompt::application::usecases::{PromptController, SettingsClickHandler};
use local_file_prompt::application::{FeatureFlags, RecordStore, Storage};
use local_file_prompt::domain::{LOCAL_FILE_CONFIG, LOCAL_FTE_WINDOW, ReadyState, SETTINGS_WINDOW};
use local_file_prompt::infrastructure::{
    broadcast_analytics::BroadcastAnalytics, composite_feature_flags::CompositeFeatureFlags,
    event_bus::EventBus, headless_view::HeadlessView,
    headless_window_manager::{BLANK_URL, HeadlessWindowManager},
    http_feature_flags::HttpFeatureFlags,
    memory_store::InMemoryStorage, multi_analytics::MultiAnalytics,
    sqlite_store::SqliteStorage, static_feature_flags::StaticFeatureFlags,
    tracing_analytics::TracingAnalytics, tracing_error_log::TracingErrorLog,
};
use local_file_prompt::interfaces::config::Config;
use local_file_prompt::interfaces::http_api::{ApiState, build_router};

#[derive(Parser, Debug)]
#[command(name = "local-file-prompt")]
struct Args {
    /// Path to config.yaml
    #[arg(long, default_value = "config.yaml")]
    config: String,

    /// Press the continue button once, print storage and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("local_file_prompt=info".parse()?),
        )
        .init();
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_path(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env"));
    }
    let args = Args::parse();

    // 1) load config
    let cfg = match Config::load_from_file(&args.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // 2) build infra
    let storage: Arc<dyn Storage> = match cfg.database_url() {
        Some(url) => Arc::new(SqliteStorage::connect(url).await?),
        None => {
            tracing::warn!("storage.database_url not set, prompt state is kept in memory");
            Arc::new(InMemoryStorage::new())
        }
    };

    let remote: Option<Box<dyn FeatureFlags>> = cfg
        .feature_flag_endpoint()
        .map(|endpoint| Box::new(HttpFeatureFlags::new(endpoint)) as Box<dyn FeatureFlags>);
    if remote.is_none() {
        tracing::warn!("feature_flags.endpoint not set, only overrides are served");
    }
    let flags: Arc<dyn FeatureFlags> = Arc::new(CompositeFeatureFlags::new(
        StaticFeatureFlags::new(cfg.feature_flags.overrides.clone()),
        remote,
    ));

    let bus = EventBus::new(64);
    let analytics = MultiAnalytics::new(vec![
        Box::new(TracingAnalytics::new()),
        Box::new(BroadcastAnalytics::new(bus.clone())),
    ]);

    let windows = HeadlessWindowManager::new();
    let view = HeadlessView::prompt_page(ReadyState::Loading);
    let settings_url: Arc<str> = Arc::from(cfg.settings_url());

    // 3) prompt page
    let controller = PromptController {
        view: Arc::new(view.clone()),
        click: SettingsClickHandler {
            storage: storage.clone(),
            flags: flags.clone(),
            windows: Arc::new(windows.clone()),
            analytics: Arc::new(analytics),
            errors: Arc::new(TracingErrorLog::new()),
            settings_url: settings_url.clone(),
        },
    };
    let mounted = tokio::spawn(async move { controller.mount().await });
    view.finish_loading();
    mounted.await?;

    if let Some(descriptor) = &cfg.fte_window {
        RecordStore::new(storage.as_ref())
            .put(&LOCAL_FTE_WINDOW, descriptor)
            .await?;
        windows.adopt(descriptor, BLANK_URL)?;
        tracing::info!(window_id = descriptor.id, "seeded FTE window");
    }

    // 4) run
    if args.once {
        for task in view.click(CONTINUE_BUTTON_ID)? {
            task.await?;
        }
        let records = RecordStore::new(storage.as_ref());
        let prompt_state = records.get(&LOCAL_FILE_CONFIG).await?;
        let fte_window = records.get(&LOCAL_FTE_WINDOW).await?;
        let settings_window = records.get(&SETTINGS_WINDOW).await?;
        let dump = serde_json::json!({
            (LOCAL_FILE_CONFIG.name()): prompt_state,
            (LOCAL_FTE_WINDOW.name()): fte_window,
            (SETTINGS_WINDOW.name()): settings_window,
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let state = ApiState {
        storage,
        flags,
        view,
        windows,
        settings_url,
        api_token: cfg.api_token().map(str::to_string),
        event_bus: Some(bus),
    };
    let listener = tokio::net::TcpListener::bind(&cfg.http.bind).await?;
    tracing::info!(bind = %cfg.http.bind, "prompt host listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
