//! Parental Guide - a parental-guidance ratings aggregation server
//!
//! Normalizes content ratings from third-party review sites and serves them
//! through a small HTTP API backed by a persistent SQLite cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parental_guide::api::{create_router, AppState};
use parental_guide::cache::ReviewCache;
use parental_guide::config::Config;
use parental_guide::providers::{OmdbClient, ProviderRegistry};

/// Main entry point for the ratings cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the persistent cache (fatal if the store is unavailable)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
///
/// Invoked with the `clear` argument, wipes every cached entry and exits
/// instead of serving.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parental_guide=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => run_server().await,
        [arg] if arg == "clear" => clear_cache(),
        _ => {
            eprintln!("[!] Usage: parental_guide [clear]");
            eprintln!("    Running with \"clear\" removes every cached entry.");
            std::process::exit(2);
        }
    }
}

/// Serves the HTTP API until a shutdown signal arrives.
async fn run_server() -> anyhow::Result<()> {
    info!("Starting Parental Guide ratings server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_db={}, port={}, busy_timeout={}s",
        config.db_path().display(),
        config.server_port,
        config.busy_timeout_secs
    );

    // Open the process-wide cache handle; an unavailable store is fatal here
    let cache = ReviewCache::open(
        &config.db_path(),
        std::time::Duration::from_secs(config.busy_timeout_secs),
    )
    .context("failed to open the cache store")?;
    info!("Cache store initialized");

    // Site scrapers implementing `Provider` register here as they are ported
    let providers = ProviderRegistry::new();

    let state = AppState::new(cache, providers);
    let state = match OmdbClient::from_env() {
        Some(omdb) => state.with_omdb(omdb),
        None => {
            warn!("OMDB_API_KEY not set, title resolution for identifier-only lookups disabled");
            state
        }
    };

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Clears every cached entry and exits.
fn clear_cache() -> anyhow::Result<()> {
    let config = Config::from_env();
    let cache = ReviewCache::open(
        &config.db_path(),
        std::time::Duration::from_secs(config.busy_timeout_secs),
    )
    .context("failed to open the cache store")?;

    let removed = cache.clear().context("failed to clear the cache")?;
    println!(" * Cache cleared ({removed} entries)");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
