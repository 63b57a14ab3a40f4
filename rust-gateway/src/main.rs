//! RollBot Web Server - interactions webhook receiver.
//!
//! This binary serves the interaction webhook endpoint:
//! - Receives signed interaction events from Discord
//! - Verifies each request's Ed25519 signature before any parsing
//! - Routes verified events to the static command registry
//! - Answers with the platform-shaped response envelope

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rollbot::web::{health, index, interactions, register, AppState};
use rollbot::{CommandRegistry, Config, SignatureVerifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        public_key_configured = config.discord_public_key.is_some(),
        registration_configured = config.registration_configured(),
        "config_loaded"
    );

    // Import the verification key once; every request reuses the handle
    let public_key = config
        .discord_public_key
        .clone()
        .context("DISCORD_PUBLIC_KEY must be set")?;
    let verifier = SignatureVerifier::new(public_key)
        .context("DISCORD_PUBLIC_KEY is not a valid Ed25519 public key")?;

    // Build the static command catalog
    let application_id = config
        .discord_application_id
        .clone()
        .context("DISCORD_APPLICATION_ID must be set")?;
    let registry = CommandRegistry::new(&application_id);
    info!(
        command_count = registry.definitions().len(),
        "command_registry_built"
    );

    // Create application state
    let state = AppState::new(config.clone(), verifier, registry);

    // Build the router
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/interactions", post(interactions))
        .route("/commands/register", post(register))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
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
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
