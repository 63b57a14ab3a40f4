//! Command schema types for platform registration.
//!
//! These types serialize exactly to the Discord application-command schema;
//! the platform validates interaction events against whatever was
//! registered, so field names and shapes here are load-bearing.

use std::collections::BTreeMap;

use serde::Serialize;

/// Option type discriminant for a string option.
pub const OPTION_TYPE_STRING: u8 = 3;

/// One option in a command's schema.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOptionDefinition {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub autocomplete: bool,
}

/// A registered slash command's schema.
///
/// Constructed once at process start and immutable afterward. `name` is the
/// canonical lowercase registry key.
#[derive(Debug, Clone, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOptionDefinition>,
    /// Stringified permission bitmask, as the registration API expects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
}

impl CommandDefinition {
    /// A minimal command with no localizations, options, or permission mask.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            name_localizations: None,
            description_localizations: None,
            options: Vec::new(),
            default_member_permissions: None,
        }
    }
}
