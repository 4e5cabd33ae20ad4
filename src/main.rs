//! Logos Energía SIPS lookup service
//!
//! Serves `POST /` with a CUPS identifier. Each request logs into the SIPS
//! portal, searches for the supply point and returns its contracted power,
//! annual consumption and the last 12 months of energy and demand readings.
//!
//! # Features
//!
//! - One isolated portal session per lookup
//! - Per-request and per-lookup timeouts
//! - Graceful shutdown on SIGTERM/SIGINT

mod api;
mod config;
mod error;
mod model;
mod sips;


use crate::api::AppState;
use crate::sips::SipsService;
use anyhow::Context;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_app_config().context("Failed to load AppConfig")?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let server_config = config::load_server_config().context("Failed to load ServerConfig")?;
    let sips_config = config::load_sips_config().context("Failed to load SipsConfig")?;
    if let Err(e) = sips_config.credentials() {
        tracing::warn!("{}; lookups will fail until it is set", e);
    }
    tracing::debug!("SIPS configuration: {:?}", sips_config);

    let sips = Arc::new(SipsService::new(sips_config).context("Failed to create SIPS client")?);
    let app = api::create_router(AppState { sips })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}. Press Ctrl-C or send SIGTERM to terminate.", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

/// Resolves on SIGTERM (container stop) or SIGINT.
async fn shutdown_signal() {
    let mut sig_term = match signal(SignalKind::terminate()) {
        Ok(sig_term) => sig_term,
        Err(e) => {
            tracing::error!("Failed to register SIGTERM handler: {}", e);
            if ctrl_c().await.is_ok() {
                tracing::info!("Received SIGINT. Exiting...");
            }
            return;
        }
    };

    tokio::select! {
        _ = sig_term.recv() => tracing::info!("Received SIGTERM. Exiting..."),
        _ = ctrl_c() => tracing::info!("Received SIGINT. Exiting..."),
    }
}
