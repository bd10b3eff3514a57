use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw inbound event as delivered by the transport layer.
///
/// Mirrors the shape of a WhatsApp Web message node: exactly one of the
/// content fields is normally set, and control events carry a `stub_type`
/// instead of content. The normalizer turns this into an [`InboundMessage`]
/// or drops it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    /// Protocol-assigned message id, unique within a chat.
    pub id: String,
    /// Conversation JID (individual or group).
    pub chat_id: String,
    /// Author JID. Equals `chat_id` for 1:1 chats.
    pub sender_id: String,
    /// Unix seconds.
    pub timestamp: i64,
    /// Whether this event was authored by our own account.
    #[serde(default)]
    pub from_me: bool,
    /// Protocol control/stub marker (e.g. "E2E_IDENTITY_CHANGED").
    /// Present means the event carries no real content.
    #[serde(default)]
    pub stub_type: Option<String>,
    /// Plain text content.
    #[serde(default)]
    pub conversation: Option<String>,
    /// Extended text content (replies, link previews).
    #[serde(default)]
    pub extended_text: Option<ExtendedText>,
    /// Media content. Only the caption is of interest to dispatch.
    #[serde(default)]
    pub media: Option<MediaContent>,
}

/// Extended text body with an optional reference to a quoted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedText {
    pub text: String,
    #[serde(default)]
    pub quoted: Option<QuotedRef>,
}

/// Media payload metadata. Download/transcode is the transport's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaContent {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
}

/// Reference to a message being replied to.
///
/// Only the id and participant are captured; resolving the quoted
/// message's content is the transport's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedRef {
    pub id: String,
    pub participant: String,
}

/// Canonical representation of one received chat message.
///
/// Built fresh per raw event, never mutated, discarded after dispatch.
/// `text` is trimmed and non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub quoted: Option<QuotedRef>,
}

/// A recognized command extracted from an [`InboundMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Lowercased command keyword, prefix already stripped.
    pub command: String,
    /// Remaining whitespace-split tokens.
    pub args: Vec<String>,
}

/// Result of a plugin execution, reflected back to the user as a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}
