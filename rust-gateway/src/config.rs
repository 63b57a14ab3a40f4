//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables, matching the
//! deployment's secret layout.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Hex-encoded Ed25519 public key used to verify interaction signatures
    pub discord_public_key: Option<String>,

    /// Discord application id (used in the invite URL and registration calls)
    pub discord_application_id: Option<String>,

    /// Bot token for the command-registration API call
    pub discord_bot_token: Option<String>,

    /// Shared secret guarding the /commands/register endpoint
    pub register_auth_token: Option<String>,

    /// Base URL of the Discord REST API
    pub discord_api_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            discord_public_key: env::var("DISCORD_PUBLIC_KEY").ok(),

            discord_application_id: env::var("DISCORD_APPLICATION_ID").ok(),

            discord_bot_token: env::var("DISCORD_TOKEN").ok(),

            register_auth_token: env::var("REGISTER_AUTH_TOKEN").ok(),

            discord_api_base: env::var("DISCORD_API_BASE")
                .unwrap_or_else(|_| "https://discord.com/api/v10".to_string()),
        }
    }

    /// Whether the registration endpoint has everything it needs.
    pub fn registration_configured(&self) -> bool {
        self.discord_application_id.is_some() && self.discord_bot_token.is_some()
    }
}
