//! Interaction dispatch pipeline.
//!
//! One request flows verify → parse → route → respond, each step gated on
//! the previous one. The body stays untrusted bytes until the signature
//! check passes, and the bytes that were verified are the bytes that get
//! parsed.
//!
//! ```text
//! RECEIVED → REJECTED (401)
//!          → VERIFIED → RESPONDED (400 malformed)
//!                     → ROUTED → RESPONDED (200 / 400 unknown)
//! ```

use tracing::{info, warn};

use crate::commands::CommandRegistry;
use crate::interaction::response::InteractionResponse;
use crate::interaction::types::{Interaction, PayloadError};
use crate::web::signature::SignatureVerifier;

/// Terminal failure states of the dispatch pipeline.
///
/// Every variant maps to exactly one HTTP status and one generic
/// user-visible message; internal detail stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("request signature verification failed")]
    SignatureInvalid,
    #[error("payload failed to parse after signature verification")]
    MalformedPayload(#[source] PayloadError),
    #[error("command `{0}` is not registered")]
    UnknownCommand(String),
    #[error("interaction type {0} is not handled")]
    UnknownInteractionType(u8),
}

impl DispatchError {
    /// HTTP status for this terminal state.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::SignatureInvalid => 401,
            DispatchError::MalformedPayload(_)
            | DispatchError::UnknownCommand(_)
            | DispatchError::UnknownInteractionType(_) => 400,
        }
    }

    /// Generic message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            DispatchError::SignatureInvalid => "Bad request signature.",
            DispatchError::MalformedPayload(_) => "Malformed interaction payload.",
            DispatchError::UnknownCommand(_) => "Unknown command.",
            DispatchError::UnknownInteractionType(_) => "Unknown interaction type.",
        }
    }
}

/// Run one interaction request through the pipeline.
///
/// `raw_body` must be the exact wire bytes; `signature_hex` and `timestamp`
/// are the two signature header values (empty when absent, which fails
/// verification).
pub fn dispatch(
    verifier: &SignatureVerifier,
    registry: &CommandRegistry,
    raw_body: &[u8],
    signature_hex: &str,
    timestamp: &str,
) -> Result<InteractionResponse, DispatchError> {
    if !verifier.verify(raw_body, signature_hex, timestamp) {
        return Err(DispatchError::SignatureInvalid);
    }

    // Parse the same bytes that were just verified.
    let interaction =
        Interaction::from_json(raw_body).map_err(DispatchError::MalformedPayload)?;

    match interaction {
        Interaction::Ping { id } => {
            info!(interaction_id = ?id, "interaction_ping");
            Ok(InteractionResponse::pong())
        }
        Interaction::ApplicationCommand { id, data } => {
            let Some(command) = registry.lookup(&data.name) else {
                warn!(
                    interaction_id = ?id,
                    command = %data.name,
                    "interaction_unknown_command"
                );
                return Err(DispatchError::UnknownCommand(data.name));
            };

            info!(
                interaction_id = ?id,
                command = %command.definition.name,
                option_count = data.options.len(),
                "interaction_command_routed"
            );
            Ok(InteractionResponse::channel_message(
                command.handle(&data.options),
            ))
        }
        Interaction::Other { id, kind } => {
            // Anything we registered no schema for should never arrive here.
            warn!(
                interaction_id = ?id,
                interaction_type = kind,
                "interaction_unknown_type"
            );
            Err(DispatchError::UnknownInteractionType(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::response::ResponseType;
    use ed25519_dalek::{Signer, SigningKey};

    struct Harness {
        signing_key: SigningKey,
        verifier: SignatureVerifier,
        registry: CommandRegistry,
    }

    impl Harness {
        fn new() -> Self {
            let signing_key = SigningKey::generate(&mut rand::thread_rng());
            let verifier = SignatureVerifier::new(signing_key.verifying_key()).unwrap();
            Self {
                signing_key,
                verifier,
                registry: CommandRegistry::new("424242"),
            }
        }

        fn sign(&self, body: &[u8], timestamp: &str) -> String {
            let mut message = timestamp.as_bytes().to_vec();
            message.extend_from_slice(body);
            hex::encode(self.signing_key.sign(&message).to_bytes())
        }

        fn dispatch_signed(
            &self,
            body: &[u8],
        ) -> Result<InteractionResponse, DispatchError> {
            let timestamp = "1700000000";
            let signature = self.sign(body, timestamp);
            dispatch(&self.verifier, &self.registry, body, &signature, timestamp)
        }
    }

    fn command_body(name: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "type": 2,
            "id": "1",
            "data": {
                "name": name,
                "options": [{"name": "dice", "type": 3, "value": "2d6"}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_ping_yields_pong() {
        let harness = Harness::new();
        let response = harness.dispatch_signed(br#"{"type":1}"#).unwrap();
        assert_eq!(response.kind, ResponseType::Pong);
        assert!(response.data.is_none());
    }

    #[test]
    fn test_ping_with_extra_fields_still_pongs() {
        let harness = Harness::new();
        let body = br#"{"type":1,"id":"55","application_id":"424242","version":1}"#;
        let response = harness.dispatch_signed(body).unwrap();
        assert_eq!(response.kind, ResponseType::Pong);
    }

    #[test]
    fn test_bad_signature_rejects_before_parsing() {
        let harness = Harness::new();
        // Body would be a valid ping, but the signature covers other bytes.
        let signature = harness.sign(br#"{"type":2}"#, "1700000000");
        let err = dispatch(
            &harness.verifier,
            &harness.registry,
            br#"{"type":1}"#,
            &signature,
            "1700000000",
        )
        .unwrap_err();

        assert!(matches!(err, DispatchError::SignatureInvalid));
        assert_eq!(err.status(), 401);
        assert_eq!(err.public_message(), "Bad request signature.");
    }

    #[test]
    fn test_missing_headers_reject() {
        let harness = Harness::new();
        let err = dispatch(
            &harness.verifier,
            &harness.registry,
            br#"{"type":1}"#,
            "",
            "",
        )
        .unwrap_err();
        assert!(matches!(err, DispatchError::SignatureInvalid));
    }

    #[test]
    fn test_malformed_json_with_valid_signature() {
        let harness = Harness::new();
        let err = harness.dispatch_signed(b"{definitely not json").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedPayload(_)));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_command_missing_data_is_malformed_not_unknown() {
        let harness = Harness::new();
        let err = harness.dispatch_signed(br#"{"type":2,"id":"1"}"#).unwrap_err();
        assert!(matches!(err, DispatchError::MalformedPayload(_)));
    }

    #[test]
    fn test_command_routing_is_case_insensitive() {
        let harness = Harness::new();

        for name in ["roll", "ROLL", "Roll"] {
            let response = harness.dispatch_signed(&command_body(name)).unwrap();
            assert_eq!(response.kind, ResponseType::ChannelMessageWithSource);
            let content = response.data.unwrap().content.unwrap();
            assert!(content.starts_with("Rolling 2d6:"), "got {}", content);
        }
    }

    #[test]
    fn test_unknown_command_yields_400() {
        let harness = Harness::new();
        let err = harness
            .dispatch_signed(&command_body("frobnicate"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownCommand(_)));
        assert_eq!(err.status(), 400);
        assert_eq!(err.public_message(), "Unknown command.");
    }

    #[test]
    fn test_unknown_interaction_type_yields_400() {
        let harness = Harness::new();
        let err = harness.dispatch_signed(br#"{"type":7,"id":"3"}"#).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownInteractionType(7)));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_invite_command_reply_is_ephemeral() {
        let harness = Harness::new();
        let body = serde_json::to_vec(&serde_json::json!({
            "type": 2,
            "id": "2",
            "data": {"name": "invite"}
        }))
        .unwrap();

        let response = harness.dispatch_signed(&body).unwrap();
        let data = response.data.unwrap();
        assert_eq!(
            data.content.as_deref(),
            Some("https://discord.com/api/oauth2/authorize?client_id=424242&scope=applications.commands")
        );
        assert_eq!(data.flags, Some(1 << 6));
    }

    #[test]
    fn test_resent_payload_verifies_identically() {
        let harness = Harness::new();
        let body = br#"{"type":1}"#;
        // The platform may retry with the same signed payload; both attempts
        // must succeed with the same result.
        for _ in 0..2 {
            let response = harness.dispatch_signed(body).unwrap();
            assert_eq!(response.kind, ResponseType::Pong);
        }
    }
}
