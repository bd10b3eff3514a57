use crate::{error::WrenError, traits::Transport};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Per-invocation context handed to plugins.
///
/// Carries everything a plugin may need to act: the shared transport
/// handle, the command table snapshot, and bot-level facts. Built by the
/// dispatcher for each execution; plugins never see ambient globals.
#[derive(Clone)]
pub struct CommandContext {
    transport: Arc<dyn Transport>,
    /// Ids of messages the bot itself sent — consulted by the normalizer
    /// to drop our own echo.
    sent_ids: Arc<Mutex<HashSet<String>>>,
    /// Configured command prefix ("" in prefix-less mode).
    pub prefix: String,
    /// Registered command names at dispatch time, registration order.
    pub command_names: Vec<String>,
    /// When the bot process came up.
    pub started_at: Instant,
}

impl CommandContext {
    pub fn new(
        transport: Arc<dyn Transport>,
        sent_ids: Arc<Mutex<HashSet<String>>>,
        prefix: String,
        command_names: Vec<String>,
        started_at: Instant,
    ) -> Self {
        Self {
            transport,
            sent_ids,
            prefix,
            command_names,
            started_at,
        }
    }

    /// The shared transport, for plugins that send beyond plain text.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Send a text reply and record its id for echo prevention.
    ///
    /// Plugins should prefer this over `transport().send_text` — replies
    /// sent through here are never re-dispatched as inbound commands.
    pub async fn reply(&self, chat_id: &str, text: &str) -> Result<(), WrenError> {
        let id = self.transport.send_text(chat_id, text).await?;
        self.sent_ids.lock().await.insert(id);
        Ok(())
    }
}
