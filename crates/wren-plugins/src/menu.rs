use async_trait::async_trait;
use wren_core::{
    context::CommandContext,
    error::WrenError,
    message::{CommandInvocation, InboundMessage, Outcome},
    traits::Plugin,
};

/// Lists every registered command, rendered with the active prefix.
pub struct MenuPlugin;

impl MenuPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MenuPlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the menu text from a command-name snapshot.
///
/// WhatsApp has no markdown tables or headers — bold + bullets only.
fn render_menu(prefix: &str, names: &[String]) -> String {
    let mut out = String::from("*wren* commands:\n");
    for name in names {
        out.push_str(&format!("• {prefix}{name}\n"));
    }
    if prefix.is_empty() {
        out.push_str("\n(no prefix configured — just start a message with a command name)");
    }
    out
}

#[async_trait]
impl Plugin for MenuPlugin {
    fn name(&self) -> &str {
        "menu"
    }

    fn commands(&self) -> &[&str] {
        &["menu", "help"]
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invocation: &CommandInvocation,
        message: &InboundMessage,
    ) -> Result<Outcome, WrenError> {
        let text = render_menu(&ctx.prefix, &ctx.command_names);
        ctx.reply(&message.chat_id, &text).await?;
        Ok(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_ctx, test_message, CaptureTransport};
    use std::sync::Arc;

    #[test]
    fn test_render_with_prefix() {
        let names = vec!["ping".to_string(), "menu".to_string()];
        let text = render_menu(".", &names);
        assert!(text.contains("• .ping"));
        assert!(text.contains("• .menu"));
        assert!(!text.contains("no prefix configured"));
    }

    #[test]
    fn test_render_prefixless_note() {
        let text = render_menu("", &["ping".to_string()]);
        assert!(text.contains("• ping"));
        assert!(text.contains("no prefix configured"));
    }

    #[tokio::test]
    async fn test_menu_lists_registered_commands() {
        let transport = Arc::new(CaptureTransport::default());
        let ctx = test_ctx(transport.clone(), &["ping", "menu", "help"]);
        let msg = test_message(".menu");
        let inv = CommandInvocation {
            command: "menu".to_string(),
            args: vec![],
        };

        let outcome = MenuPlugin::new().execute(&ctx, &inv, &msg).await.unwrap();
        assert_eq!(outcome, Outcome::Success);

        let sent = transport.sent.lock().await;
        assert!(sent[0].1.contains(".ping"));
        assert!(sent[0].1.contains(".help"));
    }
}
