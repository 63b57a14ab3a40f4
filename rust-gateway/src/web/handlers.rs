//! Webhook endpoint handlers.
//!
//! The interactions handler is deliberately thin: it pulls the two
//! signature headers and the raw body off the request and hands them to the
//! dispatch pipeline. The body is taken as raw bytes, never re-serialized,
//! so the bytes that get verified are the bytes Discord signed.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::interaction::dispatch;
use crate::registration::register_commands;
use crate::web::signature::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::{CommandRegistry, Config};

/// Shared application state.
///
/// Everything here is read-only after startup; clones are cheap Arc bumps.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: Arc<SignatureVerifier>,
    pub registry: Arc<CommandRegistry>,
}

impl AppState {
    pub fn new(config: Config, verifier: SignatureVerifier, registry: CommandRegistry) -> Self {
        Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            registry: Arc::new(registry),
        }
    }
}

/// Generic error body returned for rejected requests.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: &'static str,
}

// =============================================================================
// Landing + Health
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Landing page for anyone poking the bare URL.
pub async fn index() -> &'static str {
    "rollbot is listening for interactions."
}

// =============================================================================
// Interactions Webhook
// =============================================================================

/// Interactions webhook endpoint.
///
/// This endpoint:
/// 1. Extracts the signature and timestamp headers
/// 2. Runs the verify → parse → route pipeline on the raw body
/// 3. Maps the terminal state to exactly one HTTP response
pub async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);

    info!(
        body_length = body.len(),
        has_signature = !signature.is_empty(),
        has_timestamp = !timestamp.is_empty(),
        "interaction_received"
    );

    match dispatch(&state.verifier, &state.registry, &body, signature, timestamp) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::BAD_REQUEST);
            (
                status,
                Json(ErrorResponse {
                    message: err.public_message(),
                }),
            )
                .into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// =============================================================================
// Command Registration (administrative)
// =============================================================================

/// Bulk command registration endpoint.
///
/// Guarded by a shared-secret bearer token; on success the remote
/// platform's reply is relayed verbatim (status + body), whether it
/// accepted the catalog or not.
pub async fn register(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(expected) = state.config.register_auth_token.as_deref() else {
        warn!("register_auth_not_configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                message: "Registration is not configured.",
            }),
        )
            .into_response();
    };

    let provided = header_str(&headers, "authorization");
    let provided = provided.strip_prefix("Bearer ").unwrap_or("");

    if !constant_time_compare(provided, expected) {
        warn!(has_token = !provided.is_empty(), "register_auth_rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                message: "Bad authorization token.",
            }),
        )
            .into_response();
    }

    let (Some(application_id), Some(bot_token)) = (
        state.config.discord_application_id.as_deref(),
        state.config.discord_bot_token.as_deref(),
    ) else {
        warn!("register_credentials_not_configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                message: "Registration is not configured.",
            }),
        )
            .into_response();
    };

    match register_commands(
        &state.registry,
        &state.config.discord_api_base,
        application_id,
        bot_token,
    )
    .await
    {
        Ok(outcome) => {
            info!(
                status_code = outcome.status,
                upstream_success = outcome.is_success(),
                "register_relaying_upstream_response"
            );
            let status =
                StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                outcome.body,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "register_upstream_call_failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    message: "Command registration call failed.",
                }),
            )
                .into_response()
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
