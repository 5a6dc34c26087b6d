//! Sieved - an incremental sieve computation server
//!
//! Generates sieve-filtered integer sequences over HTTP, caching the
//! largest computed prefix per domain and extending it incrementally.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod sieve;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_eviction_task;

/// Main entry point for the Sieved server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration (remote URL, file, or defaults)
/// 3. Create the domain store with configured limits
/// 4. Start the background TTL eviction task
/// 5. Create the Axum router with all endpoints
/// 6. Bind the listener and optionally report startup
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
///
/// Exits non-zero on any fatal startup error (unreachable or invalid
/// configuration, unbindable address).
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sieved=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sieved computation server");

    if let Err(e) = run().await {
        error!("Fatal: {:#}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().await.context("loading configuration")?;
    info!(
        "Configuration loaded: max_bound={}, cache_ttl={}s, cache_max_entries={}, domains={}",
        config.max_bound,
        config.cache_ttl_seconds,
        config.cache_max_entries,
        config.domains.len()
    );

    let state = AppState::from_config(&config);
    info!("Domain store initialized");

    // Start background eviction task
    let eviction_handle =
        spawn_eviction_task(Arc::clone(&state.store), config.cleanup_interval_seconds);

    // Create router with all endpoints
    let app = create_router(state);

    let addr = config.listen_addr().context("resolving listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    if let Some(url) = config.report_url.clone() {
        tokio::spawn(report_startup(url, addr));
    }

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(eviction_handle))
        .await
        .context("serving HTTP")?;

    Ok(())
}

/// Posts a one-shot startup status to the configured report URL.
///
/// Reporting is best-effort; failures are logged and never fatal.
async fn report_startup(url: String, addr: SocketAddr) {
    let payload = serde_json::json!({
        "service": "sieved",
        "status": "listening",
        "address": addr.to_string(),
    });

    match reqwest::Client::new().post(&url).json(&payload).send().await {
        Ok(resp) if resp.status().is_success() => info!("Startup reported to {}", url),
        Ok(resp) => warn!("Startup report to {} returned {}", url, resp.status()),
        Err(e) => warn!("Startup report to {} failed: {}", url, e),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the eviction task and allows graceful shutdown.
async fn shutdown_signal(eviction_handle: tokio::task::JoinHandle<()>) {
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

    // Abort the eviction task
    eviction_handle.abort();
    warn!("Eviction task aborted");
}
