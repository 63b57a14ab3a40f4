//! Outbound interaction response envelopes.
//!
//! The response shape is fixed by these types at compile time; building an
//! envelope cannot fail at runtime.

use serde::{Serialize, Serializer};

/// Visibility flag: the reply is shown only to the invoking user.
pub const EPHEMERAL: u64 = 1 << 6;

/// Response type discriminants understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Answer to a ping heartbeat
    Pong = 1,
    /// A regular message reply in the invoking channel
    ChannelMessageWithSource = 4,
}

impl Serialize for ResponseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Message payload of a command reply.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl ResponseData {
    /// A plain message visible to the whole channel.
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            flags: None,
        }
    }

    /// A message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            flags: Some(EPHEMERAL),
        }
    }
}

/// The reply envelope returned to the platform.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl InteractionResponse {
    /// The answer to a ping heartbeat.
    pub fn pong() -> Self {
        Self {
            kind: ResponseType::Pong,
            data: None,
        }
    }

    /// A command reply carrying the handler's message.
    pub fn channel_message(data: ResponseData) -> Self {
        Self {
            kind: ResponseType::ChannelMessageWithSource,
            data: Some(data),
        }
    }
}
