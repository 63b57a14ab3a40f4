//! RollBot Register - deploy-time command registration.
//!
//! Pushes the full command catalog to the Discord API as one bulk
//! overwrite. Run this after deploying whenever the catalog changes; it is
//! the CLI twin of the web server's /commands/register endpoint.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rollbot::registration::register_commands;
use rollbot::{CommandRegistry, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("register_starting");

    let config = Config::from_env();

    let application_id = config
        .discord_application_id
        .clone()
        .context("DISCORD_APPLICATION_ID must be set")?;
    let bot_token = config
        .discord_bot_token
        .clone()
        .context("DISCORD_TOKEN must be set")?;

    let registry = CommandRegistry::new(&application_id);
    info!(
        command_count = registry.definitions().len(),
        "command_registry_built"
    );

    let outcome = register_commands(
        &registry,
        &config.discord_api_base,
        &application_id,
        &bot_token,
    )
    .await?;

    if !outcome.is_success() {
        bail!(
            "registration rejected upstream: status {} body {}",
            outcome.status,
            outcome.body
        );
    }

    info!(status_code = outcome.status, "register_complete");

    Ok(())
}
