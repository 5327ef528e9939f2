//! Interaction wire model for the chat-platform gateway.
//!
//! Inbound payloads are signed JSON POSTs carrying a numeric `type`
//! discriminant; outbound responses reuse the gateway's numeric response
//! types. Unknown interaction types must survive deserialization so the
//! dispatcher can acknowledge them without understanding them.

use serde::{Deserialize, Serialize};

/// Response type for a heartbeat acknowledgment.
const RESPONSE_PONG: u8 = 1;
/// Response type for a deferred message acknowledgment.
const RESPONSE_DEFERRED: u8 = 5;
/// Response type for an autocomplete choice list.
const RESPONSE_AUTOCOMPLETE: u8 = 8;
/// Visibility flag restricting a message to the requesting user.
const FLAG_EPHEMERAL: u64 = 64;

/// Maximum number of choices the gateway accepts in one response.
pub const MAX_CHOICES: usize = 25;

/// Inbound interaction type discriminant.
///
/// The gateway sends a small integer; values this service does not handle
/// are preserved in [`InteractionType::Other`] and treated as commands by
/// the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    /// Liveness check; answered with a pong, no payload semantics.
    Ping,
    /// Application command invocation.
    Command,
    /// Autocomplete request while a user is typing.
    Autocomplete,
    /// Any other type, carried verbatim.
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::Command,
            4 => Self::Autocomplete,
            other => Self::Other(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::Command => 2,
            InteractionType::Autocomplete => 4,
            InteractionType::Other(other) => other,
        }
    }
}

/// A verified inbound interaction payload.
///
/// Immutable once received; never persisted. Fields this service does not
/// read (ids, tokens, member info) are intentionally not modeled — command
/// payloads are forwarded as raw bytes, not re-serialized from this type.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    /// Interaction type discriminant.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Command payload, present for command and autocomplete interactions.
    #[serde(default)]
    pub data: Option<InteractionData>,
}

/// Command identifier and options of an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    /// Command name, e.g. `nbastats`.
    #[serde(default)]
    pub name: String,
    /// Ordered option records as typed by the user.
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

/// A single command option.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionOption {
    /// Option name.
    pub name: String,
    /// Option value; the gateway sends strings, numbers, or booleans.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Whether this option currently has input focus.
    #[serde(default)]
    pub focused: bool,
}

impl InteractionOption {
    /// Returns the option value as a string slice, if it is one.
    pub fn value_as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// A single (label, value) autocomplete choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display label shown to the user.
    pub name: String,
    /// Opaque value submitted when the choice is picked.
    pub value: String,
}

/// Outbound interaction response.
///
/// Serializes to one of the three shapes the gateway understands: pong,
/// autocomplete choice list, or deferred ephemeral acknowledgment.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    /// Numeric response type.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Response payload, omitted for pong.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

/// Payload of an interaction response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Autocomplete choice list.
    Choices {
        /// At most [`MAX_CHOICES`] entries.
        choices: Vec<Choice>,
    },
    /// Message flags for a deferred acknowledgment.
    Flags {
        /// Visibility flags bitfield.
        flags: u64,
    },
}

impl InteractionResponse {
    /// Heartbeat acknowledgment: `{"type":1}`.
    pub fn pong() -> Self {
        Self { kind: RESPONSE_PONG, data: None }
    }

    /// Autocomplete response carrying at most [`MAX_CHOICES`] choices.
    ///
    /// Truncates silently; callers are expected to have capped the list
    /// already.
    pub fn autocomplete(mut choices: Vec<Choice>) -> Self {
        choices.truncate(MAX_CHOICES);
        Self { kind: RESPONSE_AUTOCOMPLETE, data: Some(ResponseData::Choices { choices }) }
    }

    /// Deferred, ephemeral acknowledgment: `{"type":5,"data":{"flags":64}}`.
    pub fn deferred_ephemeral() -> Self {
        Self { kind: RESPONSE_DEFERRED, data: Some(ResponseData::Flags { flags: FLAG_EPHEMERAL }) }
    }
}
