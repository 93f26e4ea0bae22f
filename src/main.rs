use anyhow::Result;
use clap::Parser;
use just_talk_core::{AppState, AsrController, Config, NullEngine, SettingsStore};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "just-talk-core", about = "Session controller service for the JustTalk speech assistant")]
struct Args {
    /// Configuration file (without extension, config-crate style)
    #[arg(long, default_value = "config/just-talk")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config).unwrap_or_else(|e| {
        warn!("No config at {} ({}); using defaults", args.config, e);
        Config::default()
    });

    info!("JustTalk core v0.1.0");
    info!("Service: {}", cfg.service.name);

    let store = SettingsStore::new(&cfg.storage.settings_path);
    let settings = store.load();
    info!("Settings loaded from {}", store.path().display());

    // TODO: swap NullEngine for the streaming WebSocket client once it lands.
    let controller = AsrController::new(settings, Box::new(NullEngine), Some(store));
    controller.set_retry_policy(cfg.retry_policy()).await;

    let state = AppState::new(controller);
    let router = just_talk_core::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
