use async_trait::async_trait;
use wren_core::{
    context::CommandContext,
    error::WrenError,
    message::{CommandInvocation, InboundMessage, Outcome},
    traits::Plugin,
};

/// Liveness check — replies with how far behind the bot is running.
pub struct PingPlugin;

impl PingPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PingPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for PingPlugin {
    fn name(&self) -> &str {
        "ping"
    }

    fn commands(&self) -> &[&str] {
        &["ping"]
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invocation: &CommandInvocation,
        message: &InboundMessage,
    ) -> Result<Outcome, WrenError> {
        // Age of the message at dispatch time. Clock skew between the
        // sending device and us can make this negative; clamp to zero.
        let lag_ms = (chrono::Utc::now() - message.timestamp)
            .num_milliseconds()
            .max(0);
        ctx.reply(&message.chat_id, &format!("pong 🏓 {lag_ms}ms"))
            .await?;
        Ok(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_ctx, test_message, CaptureTransport};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ping_replies_pong() {
        let transport = Arc::new(CaptureTransport::default());
        let ctx = test_ctx(transport.clone(), &["ping"]);
        let msg = test_message(".ping");
        let inv = CommandInvocation {
            command: "ping".to_string(),
            args: vec![],
        };

        let outcome = PingPlugin::new().execute(&ctx, &inv, &msg).await.unwrap();
        assert_eq!(outcome, Outcome::Success);

        let sent = transport.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, msg.chat_id);
        assert!(sent[0].1.starts_with("pong"), "reply: {}", sent[0].1);
    }
}
