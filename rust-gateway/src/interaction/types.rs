//! Inbound interaction event types.
//!
//! This module defines the wire format for interaction webhooks and the
//! typed event the dispatcher routes on. Parsing happens strictly after
//! signature verification; a payload that deserializes but is missing a
//! variant's required fields is rejected here rather than half-handled.

use serde::Deserialize;

/// Wire discriminant for a ping heartbeat.
pub const INTERACTION_TYPE_PING: u8 = 1;

/// Wire discriminant for a slash-command invocation.
pub const INTERACTION_TYPE_APPLICATION_COMMAND: u8 = 2;

/// Errors raised while turning a raw body into an [`Interaction`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("application command payload is missing data")]
    MissingCommandData,
}

/// Raw interaction payload as it appears on the wire.
///
/// Discord sends the discriminant as a number; everything else is
/// per-variant. Deserialized permissively, then validated into the typed
/// [`Interaction`] union.
#[derive(Debug, Deserialize)]
struct WireInteraction {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    data: Option<WireCommandData>,
}

#[derive(Debug, Deserialize)]
struct WireCommandData {
    name: String,
    #[serde(default)]
    options: Vec<CommandOption>,
}

/// A single typed option on a slash-command invocation.
///
/// Option order is preserved as sent by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    /// Option name as registered in the command schema
    pub name: String,
    /// Option type discriminant (3 = string, 4 = integer, ...)
    #[serde(rename = "type")]
    pub kind: u8,
    /// The user-supplied value, shaped by `kind`
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl CommandOption {
    /// The option value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| v.as_str())
    }

    /// The option value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_ref().and_then(|v| v.as_i64())
    }
}

/// Command payload carried by an application-command interaction.
#[derive(Debug, Clone)]
pub struct CommandData {
    /// Invoked command name (matched case-insensitively against the registry)
    pub name: String,
    /// Ordered options as supplied by the user
    pub options: Vec<CommandOption>,
}

/// A verified, parsed interaction event.
#[derive(Debug)]
pub enum Interaction {
    /// Heartbeat from the platform; answered without a registry lookup
    Ping { id: Option<String> },
    /// Slash-command invocation
    ApplicationCommand {
        id: Option<String>,
        data: CommandData,
    },
    /// Any interaction type outside the handled set
    Other { id: Option<String>, kind: u8 },
}

impl Interaction {
    /// Parse a raw body into a typed interaction.
    ///
    /// `raw` must be the same bytes that passed signature verification.
    /// Variant-specific required fields are enforced here: an application
    /// command without `data` is malformed, not an unknown command.
    pub fn from_json(raw: &[u8]) -> Result<Self, PayloadError> {
        let wire: WireInteraction = serde_json::from_slice(raw)?;

        match wire.kind {
            INTERACTION_TYPE_PING => Ok(Interaction::Ping { id: wire.id }),
            INTERACTION_TYPE_APPLICATION_COMMAND => {
                let data = wire.data.ok_or(PayloadError::MissingCommandData)?;
                Ok(Interaction::ApplicationCommand {
                    id: wire.id,
                    data: CommandData {
                        name: data.name,
                        options: data.options,
                    },
                })
            }
            kind => Ok(Interaction::Other { id: wire.id, kind }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ping() {
        let interaction = Interaction::from_json(br#"{"type":1}"#).unwrap();
        assert!(matches!(interaction, Interaction::Ping { id: None }));
    }

    #[test]
    fn test_parse_application_command() {
        let raw = br#"{
            "type": 2,
            "id": "846462639134605312",
            "data": {
                "name": "roll",
                "options": [{"name": "dice", "type": 3, "value": "2d6"}]
            }
        }"#;

        let interaction = Interaction::from_json(raw).unwrap();
        match interaction {
            Interaction::ApplicationCommand { id, data } => {
                assert_eq!(id.as_deref(), Some("846462639134605312"));
                assert_eq!(data.name, "roll");
                assert_eq!(data.options.len(), 1);
                assert_eq!(data.options[0].name, "dice");
                assert_eq!(data.options[0].kind, 3);
                assert_eq!(data.options[0].as_str(), Some("2d6"));
            }
            other => panic!("Expected ApplicationCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_without_data_is_malformed() {
        let err = Interaction::from_json(br#"{"type":2,"id":"1"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::MissingCommandData));
    }

    #[test]
    fn test_parse_unknown_type() {
        let interaction = Interaction::from_json(br#"{"type":5,"id":"9"}"#).unwrap();
        match interaction {
            Interaction::Other { id, kind } => {
                assert_eq!(id.as_deref(), Some("9"));
                assert_eq!(kind, 5);
            }
            other => panic!("Expected Other, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = Interaction::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn test_option_accessors() {
        let option: CommandOption =
            serde_json::from_str(r#"{"name":"count","type":4,"value":3}"#).unwrap();
        assert_eq!(option.as_i64(), Some(3));
        assert_eq!(option.as_str(), None);
    }

    #[test]
    fn test_options_preserve_order() {
        let raw = br#"{
            "type": 2,
            "data": {
                "name": "roll",
                "options": [
                    {"name": "b", "type": 3, "value": "2"},
                    {"name": "a", "type": 3, "value": "1"}
                ]
            }
        }"#;

        let interaction = Interaction::from_json(raw).unwrap();
        let Interaction::ApplicationCommand { data, .. } = interaction else {
            panic!("Expected ApplicationCommand");
        };
        let names: Vec<&str> = data.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
