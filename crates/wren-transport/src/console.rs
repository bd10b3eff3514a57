//! Console transport — stdin in, stdout out.
//!
//! Each stdin line is one inbound event: either a JSON-encoded `RawEvent`
//! (replay mode) or plain text, which gets wrapped into a synthetic 1:1
//! event from the `console` chat. Outbound texts and reactions are printed.
//! No protocol work happens here.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;
use wren_core::{error::WrenError, message::RawEvent, traits::Transport};

const CONSOLE_JID: &str = "console@local";

/// Interactive/replay transport for local development.
pub struct ConsoleTransport {
    user_id: String,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            user_id: format!("wren@{}", CONSOLE_JID),
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one stdin line into an event.
///
/// Lines starting with `{` must be valid `RawEvent` JSON; anything else
/// becomes a synthetic plain-text event.
fn parse_line(line: &str) -> Result<RawEvent, WrenError> {
    let line = line.trim();
    if line.starts_with('{') {
        return Ok(serde_json::from_str(line)?);
    }
    Ok(RawEvent {
        id: Uuid::new_v4().to_string(),
        chat_id: CONSOLE_JID.to_string(),
        sender_id: CONSOLE_JID.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        from_me: false,
        stub_type: None,
        conversation: Some(line.to_string()),
        extended_text: None,
        media: None,
    })
}

#[async_trait]
impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    async fn start(&self) -> Result<mpsc::Receiver<RawEvent>, WrenError> {
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match parse_line(&line) {
                            Ok(event) => {
                                if tx.send(event).await.is_err() {
                                    info!("console receiver dropped, stopping reader");
                                    break;
                                }
                            }
                            Err(e) => warn!("skipping malformed console event: {e}"),
                        }
                    }
                    Ok(None) => {
                        info!("console stdin closed");
                        break;
                    }
                    Err(e) => {
                        warn!("console read error: {e}");
                        break;
                    }
                }
            }
        });

        info!("console transport started (plain text or RawEvent JSON per line)");
        Ok(rx)
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<String, WrenError> {
        let id = Uuid::new_v4().to_string();
        println!("[{chat_id}] {text}");
        Ok(id)
    }

    async fn send_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), WrenError> {
        if emoji.is_empty() {
            println!("[{chat_id}] reaction cleared on {message_id}");
        } else {
            println!("[{chat_id}] {emoji} on {message_id}");
        }
        Ok(())
    }

    async fn current_user_id(&self) -> Option<String> {
        Some(self.user_id.clone())
    }

    async fn stop(&self) -> Result<(), WrenError> {
        info!("console transport stopped");
        Ok(())
    }
}
