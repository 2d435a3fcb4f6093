//! Curio server binary.

use anyhow::{Context, Result};
use clap::Parser;
use curio_core::config::AppConfig;
use curio_server::bootstrap::ensure_default_image;
use curio_server::{AppState, create_router};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Curio - a small item catalog server
#[derive(Parser, Debug)]
#[command(name = "curiod")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "CURIO_CONFIG", default_value = "config/server.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("Curio v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // Check for CURIO_ environment variables (excluding CURIO_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("CURIO_") && key != "CURIO_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: curiod --config /path/to/config.toml\n  \
             2. Environment variables: CURIO_STORAGE__PATH=./images \
             CURIO_CATALOG__TYPE=sqlite CURIO_CATALOG__PATH=./db/catalog.sqlite3 curiod\n\n\
             See config/server.example.toml for example configuration.\n\
             Set CURIO_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("CURIO_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Initialize image storage
    let images = curio_storage::from_config(&config.storage)
        .await
        .context("failed to initialize image storage")?;
    tracing::info!("Image store initialized");

    // Verify storage before accepting requests and make sure the sentinel
    // image exists so the read-path fallback can never dangle.
    images
        .health_check()
        .await
        .context("image store health check failed")?;
    ensure_default_image(&images).await?;

    // Initialize catalog store
    let catalog = curio_catalog::from_config(&config.catalog)
        .await
        .context("failed to initialize catalog store")?;
    catalog
        .health_check()
        .await
        .context("catalog store health check failed")?;
    tracing::info!("Catalog store initialized");

    // Create application state and router
    let state = AppState::new(config.clone(), images, catalog);
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
