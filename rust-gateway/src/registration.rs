//! Bulk command registration against the Discord REST API.
//!
//! Registration is an administrative, out-of-band operation: it pushes the
//! whole command catalog as one overwrite. Upstream failures are returned
//! with their original status and body so callers can relay them verbatim.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::commands::CommandRegistry;

/// Outcome of the upstream registration call, relayed as-is to the caller.
#[derive(Debug)]
pub struct RegistrationOutcome {
    /// HTTP status returned by the platform
    pub status: u16,
    /// Raw response body returned by the platform
    pub body: String,
}

impl RegistrationOutcome {
    /// Whether the platform accepted the catalog.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Push the registry's full command catalog to the platform.
///
/// Issues `PUT /applications/{application_id}/commands`, which atomically
/// replaces the registered command set with `registry.definitions()`.
pub async fn register_commands(
    registry: &CommandRegistry,
    api_base: &str,
    application_id: &str,
    bot_token: &str,
) -> Result<RegistrationOutcome> {
    let definitions = registry.definitions();
    let url = format!(
        "{}/applications/{}/commands",
        api_base.trim_end_matches('/'),
        application_id
    );

    info!(
        url = %url,
        command_count = definitions.len(),
        "command_registration_starting"
    );

    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .put(&url)
        .header("Authorization", format!("Bot {}", bot_token))
        .json(&definitions)
        .send()
        .await
        .context("Registration request failed")?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .context("Failed to read registration response body")?;

    info!(
        status_code = status,
        body_length = body.len(),
        "command_registration_complete"
    );

    Ok(RegistrationOutcome { status, body })
}
