use async_trait::async_trait;
use wren_core::{
    context::CommandContext,
    error::WrenError,
    message::{CommandInvocation, InboundMessage, Outcome},
    traits::Plugin,
};

/// Repeats the arguments back into the chat.
pub struct EchoPlugin;

impl EchoPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EchoPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for EchoPlugin {
    fn name(&self) -> &str {
        "echo"
    }

    fn commands(&self) -> &[&str] {
        &["echo", "say"]
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
        message: &InboundMessage,
    ) -> Result<Outcome, WrenError> {
        if invocation.args.is_empty() {
            // Usage errors are the plugin's own text; the dispatcher only
            // signals failure through the reaction.
            ctx.reply(
                &message.chat_id,
                &format!("usage: {}{} <text>", ctx.prefix, invocation.command),
            )
            .await?;
            return Ok(Outcome::Failure);
        }

        ctx.reply(&message.chat_id, &invocation.args.join(" "))
            .await?;
        Ok(Outcome::Success)
    }
}
