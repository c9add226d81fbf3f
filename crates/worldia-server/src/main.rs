//! WORLD.IA Server - HTTP backend for the AI tools directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use worldia_core::config::AppConfig;
use worldia_core::{AiSettings, CatalogStore, HttpAiProvider, InteractionStore};
use worldia_server::{start_server, AppState};

#[derive(Parser, Debug)]
#[command(name = "worldia-server")]
#[command(about = "HTTP API for the WORLD.IA AI tools directory")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = AppConfig::DEFAULT_HOST)]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Data directory for the interactions database
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON catalog replacing the built-in tool list
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting {} server", AppConfig::APP_NAME);

    let data_dir = match args.data_dir {
        Some(path) => path,
        None => dirs::data_local_dir()
            .map(|dir| dir.join(AppConfig::DATA_DIR_NAME))
            .context("Could not determine a data directory; pass --data-dir")?,
    };
    info!("Data directory: {}", data_dir.display());

    let catalog = match &args.catalog {
        Some(path) => CatalogStore::from_json_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => CatalogStore::builtin(),
    };
    info!("Catalog holds {} tools", catalog.len());

    let interactions = InteractionStore::open(data_dir.join(AppConfig::DATABASE_FILENAME))?;

    let ai_settings = AiSettings::from_env();
    info!("AI provider: {}", ai_settings.base_url);
    let ai = HttpAiProvider::new(ai_settings)?;

    let state = AppState::new(catalog, interactions, Arc::new(ai));
    let addr = start_server(state, &args.host, args.port).await?;

    // Machine-readable port line for launchers and tests
    println!("WORLDIA_PORT={}", addr.port());

    info!("Server running on http://{}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
