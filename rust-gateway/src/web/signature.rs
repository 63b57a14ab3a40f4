//! Discord interaction signature verification.
//!
//! Discord signs every interaction webhook with Ed25519 over the raw body.
//! Reference: https://discord.com/developers/docs/interactions/overview#setting-up-an-endpoint-validating-security-request-headers

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use tracing::warn;

/// Header carrying the hex-encoded Ed25519 signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the decimal timestamp the signature covers.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Errors raised while importing public key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("public key is not valid hex")]
    InvalidHex,
    #[error("public key must be 32 bytes")]
    InvalidLength,
    #[error("public key is not a valid Ed25519 point")]
    InvalidPoint,
}

/// Public key material accepted by [`SignatureVerifier::new`].
///
/// Deployments hand us the hex string from the developer portal; tests and
/// embedders that already hold a key handle can pass it directly and skip
/// the import.
pub enum KeyMaterial {
    /// Hex-encoded 32-byte Ed25519 public key
    Hex(String),
    /// Raw 32-byte Ed25519 public key
    Raw([u8; 32]),
    /// Pre-imported verifying key handle
    Imported(VerifyingKey),
}

impl From<VerifyingKey> for KeyMaterial {
    fn from(key: VerifyingKey) -> Self {
        KeyMaterial::Imported(key)
    }
}

impl From<[u8; 32]> for KeyMaterial {
    fn from(bytes: [u8; 32]) -> Self {
        KeyMaterial::Raw(bytes)
    }
}

impl From<&str> for KeyMaterial {
    fn from(hex_key: &str) -> Self {
        KeyMaterial::Hex(hex_key.to_string())
    }
}

impl From<String> for KeyMaterial {
    fn from(hex_key: String) -> Self {
        KeyMaterial::Hex(hex_key)
    }
}

/// Verifies interaction request signatures against the application's
/// public key.
///
/// The key is imported exactly once, at construction; `verify` runs on the
/// request hot path and never re-derives it.
#[derive(Debug)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Import the public key and build a verifier.
    pub fn new(key: impl Into<KeyMaterial>) -> Result<Self, KeyError> {
        let key = match key.into() {
            KeyMaterial::Imported(key) => key,
            KeyMaterial::Raw(bytes) => {
                VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPoint)?
            }
            KeyMaterial::Hex(hex_key) => {
                let bytes = hex::decode(hex_key.trim()).map_err(|_| KeyError::InvalidHex)?;
                let bytes: [u8; 32] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| KeyError::InvalidLength)?;
                VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPoint)?
            }
        };
        Ok(Self { key })
    }

    /// Verify a signed interaction request.
    ///
    /// The signed message is `timestamp ++ raw_body`, where `raw_body` must
    /// be the exact payload bytes as received on the wire. The body is never
    /// interpreted here.
    ///
    /// # Arguments
    ///
    /// * `raw_body` - The unmodified request payload bytes
    /// * `signature_hex` - The `X-Signature-Ed25519` header value
    /// * `timestamp` - The `X-Signature-Timestamp` header value
    ///
    /// # Returns
    ///
    /// `true` only if the Ed25519 check succeeds. Every failure mode -
    /// missing header value, malformed hex, wrong signature length, or a
    /// failed cryptographic check - returns `false`. The function never
    /// panics or propagates an error.
    pub fn verify(&self, raw_body: &[u8], signature_hex: &str, timestamp: &str) -> bool {
        if signature_hex.is_empty() || timestamp.is_empty() {
            warn!(
                has_signature = !signature_hex.is_empty(),
                has_timestamp = !timestamp.is_empty(),
                "interaction_signature_missing_fields"
            );
            return false;
        }

        let sig_bytes = match hex::decode(signature_hex) {
            Ok(b) => b,
            Err(_) => {
                warn!(signature_length = signature_hex.len(), "interaction_signature_invalid_hex");
                return false;
            }
        };

        let sig_bytes: [u8; 64] = match sig_bytes.as_slice().try_into() {
            Ok(b) => b,
            Err(_) => {
                warn!(decoded_length = sig_bytes.len(), "interaction_signature_invalid_length");
                return false;
            }
        };
        let signature = Signature::from_bytes(&sig_bytes);

        // Signed message is the timestamp concatenated with the raw body.
        let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(raw_body);

        let valid = self.key.verify(&message, &signature).is_ok();

        if !valid {
            warn!(
                timestamp = %timestamp,
                body_length = raw_body.len(),
                "interaction_signature_mismatch"
            );
        }

        valid
    }
}
