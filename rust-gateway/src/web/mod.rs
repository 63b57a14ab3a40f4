//! Web server module for the interactions webhook.
//!
//! This module provides a thin web server that:
//! - Receives interaction webhooks from Discord
//! - Verifies the Ed25519 request signature before touching the body
//! - Routes verified interactions to their command handlers
//! - Exposes the administrative bulk-registration endpoint

pub mod handlers;
pub mod signature;

pub use handlers::{health, index, interactions, register, AppState, ErrorResponse, HealthResponse};
pub use signature::{KeyMaterial, SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
