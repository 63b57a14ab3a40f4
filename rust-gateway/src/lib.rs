//! RollBot - Discord interactions gateway.
//!
//! This library provides shared modules for the two RollBot binaries:
//! - `rollbot-web`: Web server receiving and answering interaction webhooks
//! - `rollbot-register`: CLI that pushes the command catalog to Discord
//!
//! ## Architecture
//!
//! ```text
//! Discord → Web Server → verify signature → parse → CommandRegistry → response
//! ```

pub mod commands;
pub mod config;
pub mod interaction;
pub mod registration;
pub mod web;

// Re-export commonly used types
pub use commands::{CommandDefinition, CommandRegistry};
pub use config::Config;
pub use interaction::{dispatch, DispatchError, Interaction, InteractionResponse};
pub use web::{AppState, SignatureVerifier};
