//! Message normalization — raw transport event in, canonical message or
//! a reason to drop it out. Pure transform, no side effects.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use wren_core::message::{InboundMessage, RawEvent};

/// Result of normalizing one raw event.
#[derive(Debug)]
pub enum Normalized {
    Message(InboundMessage),
    Ignore(IgnoreReason),
}

/// Why an event was dropped before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Protocol control/stub event, no real content.
    Stub,
    /// Echo of a message the bot itself sent.
    OwnEcho,
    /// No text field anywhere in the event.
    NoText,
    /// Broadcast/newsletter chats are never dispatched.
    Broadcast,
    /// Text present but empty after trimming.
    EmptyBody,
}

/// Broadcast and newsletter JIDs (status updates, channels).
fn is_broadcast(chat_id: &str) -> bool {
    chat_id.ends_with("@broadcast") || chat_id.ends_with("@newsletter")
}

/// Normalize one raw event against the set of bot-sent message ids.
///
/// The checks run in a fixed order; the first one that fires wins.
pub fn normalize(event: &RawEvent, sent_ids: &HashSet<String>) -> Normalized {
    if event.stub_type.is_some() {
        return Normalized::Ignore(IgnoreReason::Stub);
    }

    // Self-chat is allowed; only our own sends are dropped.
    if event.from_me && sent_ids.contains(&event.id) {
        return Normalized::Ignore(IgnoreReason::OwnEcho);
    }

    // First matching text field wins: plain text, extended text, caption.
    let (text, quoted) = if let Some(ref body) = event.conversation {
        (body.as_str(), None)
    } else if let Some(ref ext) = event.extended_text {
        (ext.text.as_str(), ext.quoted.clone())
    } else if let Some(caption) = event.media.as_ref().and_then(|m| m.caption.as_deref()) {
        (caption, None)
    } else {
        return Normalized::Ignore(IgnoreReason::NoText);
    };

    if is_broadcast(&event.chat_id) {
        return Normalized::Ignore(IgnoreReason::Broadcast);
    }

    let text = text.trim();
    if text.is_empty() {
        return Normalized::Ignore(IgnoreReason::EmptyBody);
    }

    Normalized::Message(InboundMessage {
        id: event.id.clone(),
        chat_id: event.chat_id.clone(),
        sender_id: event.sender_id.clone(),
        timestamp: DateTime::from_timestamp(event.timestamp, 0).unwrap_or_else(Utc::now),
        text: text.to_string(),
        quoted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wren_core::message::{ExtendedText, MediaContent, QuotedRef};

    fn event(text: &str) -> RawEvent {
        RawEvent {
            id: "m1".to_string(),
            chat_id: "123@s.whatsapp.net".to_string(),
            sender_id: "123@s.whatsapp.net".to_string(),
            timestamp: 1_700_000_000,
            from_me: false,
            stub_type: None,
            conversation: Some(text.to_string()),
            extended_text: None,
            media: None,
        }
    }

    fn no_sent() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_plain_text_normalizes() {
        let result = normalize(&event("  .ping  "), &no_sent());
        match result {
            Normalized::Message(msg) => {
                assert_eq!(msg.text, ".ping", "text should be trimmed");
                assert_eq!(msg.id, "m1");
                assert_eq!(msg.timestamp.timestamp(), 1_700_000_000);
                assert!(msg.quoted.is_none());
            }
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_idempotent() {
        // Same raw event, same result.
        let ev = event(".ping");
        let a = normalize(&ev, &no_sent());
        let b = normalize(&ev, &no_sent());
        match (a, b) {
            (Normalized::Message(x), Normalized::Message(y)) => assert_eq!(x, y),
            other => panic!("expected two messages, got {other:?}"),
        }
    }

    #[test]
    fn test_stub_ignored() {
        let mut ev = event(".ping");
        ev.stub_type = Some("E2E_IDENTITY_CHANGED".to_string());
        assert!(matches!(
            normalize(&ev, &no_sent()),
            Normalized::Ignore(IgnoreReason::Stub)
        ));
    }

    #[test]
    fn test_own_echo_ignored() {
        let mut ev = event("pong");
        ev.from_me = true;
        let sent: HashSet<String> = ["m1".to_string()].into_iter().collect();
        assert!(matches!(
            normalize(&ev, &sent),
            Normalized::Ignore(IgnoreReason::OwnEcho)
        ));
    }

    #[test]
    fn test_from_me_without_recorded_id_passes() {
        // Self-chat usage: our account, but not a message the bot sent.
        let mut ev = event(".ping");
        ev.from_me = true;
        assert!(matches!(normalize(&ev, &no_sent()), Normalized::Message(_)));
    }

    #[test]
    fn test_broadcast_ignored() {
        let mut ev = event(".ping");
        ev.chat_id = "status@broadcast".to_string();
        assert!(matches!(
            normalize(&ev, &no_sent()),
            Normalized::Ignore(IgnoreReason::Broadcast)
        ));

        let mut ev = event(".ping");
        ev.chat_id = "120363001122334455@newsletter".to_string();
        assert!(matches!(
            normalize(&ev, &no_sent()),
            Normalized::Ignore(IgnoreReason::Broadcast)
        ));
    }

    #[test]
    fn test_no_text_ignored() {
        let mut ev = event("");
        ev.conversation = None;
        assert!(matches!(
            normalize(&ev, &no_sent()),
            Normalized::Ignore(IgnoreReason::NoText)
        ));

        // Media without a caption carries no dispatchable text either.
        let mut ev = event("");
        ev.conversation = None;
        ev.media = Some(MediaContent {
            caption: None,
            mimetype: Some("image/jpeg".to_string()),
        });
        assert!(matches!(
            normalize(&ev, &no_sent()),
            Normalized::Ignore(IgnoreReason::NoText)
        ));
    }

    #[test]
    fn test_whitespace_only_ignored() {
        assert!(matches!(
            normalize(&event("   \n "), &no_sent()),
            Normalized::Ignore(IgnoreReason::EmptyBody)
        ));
    }

    #[test]
    fn test_extended_text_captures_quoted() {
        let mut ev = event("");
        ev.conversation = None;
        ev.extended_text = Some(ExtendedText {
            text: ".jid".to_string(),
            quoted: Some(QuotedRef {
                id: "q7".to_string(),
                participant: "456@s.whatsapp.net".to_string(),
            }),
        });
        match normalize(&ev, &no_sent()) {
            Normalized::Message(msg) => {
                assert_eq!(msg.text, ".jid");
                let quoted = msg.quoted.expect("quoted ref should be captured");
                assert_eq!(quoted.id, "q7");
                assert_eq!(quoted.participant, "456@s.whatsapp.net");
            }
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_media_caption_is_dispatchable() {
        let mut ev = event("");
        ev.conversation = None;
        ev.media = Some(MediaContent {
            caption: Some(".echo nice shot".to_string()),
            mimetype: Some("image/jpeg".to_string()),
        });
        match normalize(&ev, &no_sent()) {
            Normalized::Message(msg) => assert_eq!(msg.text, ".echo nice shot"),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_conversation_takes_precedence_over_caption() {
        let mut ev = event("direct text");
        ev.media = Some(MediaContent {
            caption: Some("caption text".to_string()),
            mimetype: None,
        });
        match normalize(&ev, &no_sent()) {
            Normalized::Message(msg) => assert_eq!(msg.text, "direct text"),
            other => panic!("expected message, got {other:?}"),
        }
    }
}
