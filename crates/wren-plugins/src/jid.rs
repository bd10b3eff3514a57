use async_trait::async_trait;
use wren_core::{
    context::CommandContext,
    error::WrenError,
    message::{CommandInvocation, InboundMessage, Outcome},
    traits::Plugin,
};

/// JID introspection — handy when wiring allowlists and owner config.
pub struct JidPlugin;

impl JidPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JidPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for JidPlugin {
    fn name(&self) -> &str {
        "jid"
    }

    fn commands(&self) -> &[&str] {
        &["jid"]
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invocation: &CommandInvocation,
        message: &InboundMessage,
    ) -> Result<Outcome, WrenError> {
        let mut text = format!("sender: {}\nchat: {}", message.sender_id, message.chat_id);
        if let Some(ref quoted) = message.quoted {
            text.push_str(&format!("\nquoted: {} by {}", quoted.id, quoted.participant));
        }
        ctx.reply(&message.chat_id, &text).await?;
        Ok(Outcome::Success)
    }
}
