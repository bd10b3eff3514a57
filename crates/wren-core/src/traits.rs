use crate::{
    context::CommandContext,
    error::WrenError,
    message::{CommandInvocation, InboundMessage, Outcome, RawEvent},
};
use async_trait::async_trait;

/// Transport trait — the wire.
///
/// The external WhatsApp Web collaborator (pairing, encryption, media)
/// lives behind this trait. The dispatch core only ever sends text and
/// reactions through it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name.
    fn name(&self) -> &str;

    /// Start delivering inbound events.
    /// Returns a receiver that yields raw protocol events.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<RawEvent>, WrenError>;

    /// Send a text message to a chat.
    /// Returns the protocol-assigned id of the sent message, so callers
    /// can record it and recognize their own echo later.
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<String, WrenError>;

    /// Attach an emoji reaction to a message. An empty emoji removes a
    /// previously attached reaction.
    async fn send_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), WrenError>;

    /// JID of the account this transport is logged in as, once known.
    async fn current_user_id(&self) -> Option<String>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), WrenError>;
}

/// Constructor entry in the static plugin manifest.
///
/// Discovery is a compiled-in list of these, not a directory scan: a
/// failing constructor skips that plugin without aborting the rest.
pub type PluginCtor = fn() -> Result<Box<dyn Plugin>, WrenError>;

/// Plugin trait — a self-contained command handler.
///
/// Implementations are registered once at startup (or on reload) and own
/// whatever internal state they choose to keep. A plugin claiming several
/// command names is not told which alias fired beyond
/// `invocation.command` itself.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Human-readable plugin name, used in logs.
    fn name(&self) -> &str;

    /// Command keywords this plugin answers to. Must be non-empty;
    /// keywords are bound lowercased by the registry.
    fn commands(&self) -> &[&str];

    /// Handle one invocation. Errors are caught at the dispatcher
    /// boundary and reported as [`Outcome::Failure`].
    async fn execute(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
        message: &InboundMessage,
    ) -> Result<Outcome, WrenError>;
}
