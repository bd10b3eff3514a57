use async_trait::async_trait;
use std::time::Duration;
use wren_core::{
    context::CommandContext,
    error::WrenError,
    message::{CommandInvocation, InboundMessage, Outcome},
    traits::Plugin,
};

/// Reports how long the bot process has been up.
pub struct UptimePlugin;

impl UptimePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UptimePlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a duration as `2d 3h 4m 5s`, dropping leading zero units.
fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 || !parts.is_empty() {
        parts.push(format!("{mins}m"));
    }
    parts.push(format!("{secs}s"));
    parts.join(" ")
}

#[async_trait]
impl Plugin for UptimePlugin {
    fn name(&self) -> &str {
        "uptime"
    }

    fn commands(&self) -> &[&str] {
        &["uptime", "runtime"]
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invocation: &CommandInvocation,
        message: &InboundMessage,
    ) -> Result<Outcome, WrenError> {
        let up = format_duration(ctx.started_at.elapsed());
        ctx.reply(&message.chat_id, &format!("up {up}")).await?;
        Ok(Outcome::Success)
    }
}
