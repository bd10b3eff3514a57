//! The per-message dispatch pipeline: normalize → classify → guard →
//! pending reaction → resolve → execute → result reaction → cooldown.

use super::normalize::{normalize, IgnoreReason, Normalized};
use super::Bot;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, error, info, trace};
use wren_core::{
    context::CommandContext,
    message::{CommandInvocation, Outcome, RawEvent},
};

/// Decide whether `text` is a command and extract the invocation.
///
/// With a prefix configured, the text must start with it; the first token
/// after the prefix is the command. With an empty prefix, the text is
/// matched case-insensitively against the registered command names, first
/// registered match wins.
pub(super) fn classify(text: &str, prefix: &str, known: &[String]) -> Option<CommandInvocation> {
    if prefix.is_empty() {
        classify_prefixless(text, known)
    } else {
        classify_prefixed(text, prefix)
    }
}

fn classify_prefixed(text: &str, prefix: &str) -> Option<CommandInvocation> {
    let rest = text.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    // A message that is exactly the prefix has no command token.
    let command = tokens.next()?.to_lowercase();
    Some(CommandInvocation {
        command,
        args: tokens.map(str::to_string).collect(),
    })
}

/// Prefix-less matching is plain starts_with, so a registered "ping" also
/// fires on "pingpong". Known quirk, kept for compatibility; see DESIGN.md
/// before changing it.
fn classify_prefixless(text: &str, known: &[String]) -> Option<CommandInvocation> {
    let lower = text.to_lowercase();
    for name in known {
        if lower.starts_with(name.as_str()) {
            // Command names are ASCII, so the byte offset lines up with
            // the original text; get() guards the odd unicode edge.
            let args = text
                .get(name.len()..)
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect();
            return Some(CommandInvocation {
                command: name.clone(),
                args,
            });
        }
    }
    None
}

impl Bot {
    /// Process a single raw inbound event. Never panics, never returns
    /// an error: everything is handled or logged here.
    pub(crate) async fn handle_event(&self, event: RawEvent) {
        // --- 1. NORMALIZE ---
        let msg = {
            let mut sent = self.sent_ids.lock().await;
            match normalize(&event, &sent) {
                Normalized::Message(msg) => msg,
                Normalized::Ignore(reason) => {
                    if reason == IgnoreReason::OwnEcho {
                        // Echo arrived; the id has done its job.
                        sent.remove(&event.id);
                    }
                    trace!("ignoring event {}: {reason:?}", event.id);
                    return;
                }
            }
        };

        // --- 2. CLASSIFY ---
        let known = self.registry.read().await.command_names().to_vec();
        let Some(invocation) = classify(&msg.text, &self.config.bot.prefix, &known) else {
            let preview: String = msg.text.chars().take(60).collect();
            debug!("[{}] not a command: {preview}", msg.chat_id);
            return;
        };

        info!(
            "[{}] {} invoked '{}' ({} args)",
            msg.chat_id,
            msg.sender_id,
            invocation.command,
            invocation.args.len(),
        );

        // --- 3. GUARD CHECK ---
        if self
            .guard
            .lock()
            .await
            .should_suppress(&msg.sender_id, &invocation.command, Instant::now())
        {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            debug!(
                "suppressed '{}' from {} (cooldown)",
                invocation.command, msg.sender_id
            );
            return;
        }

        // --- 4. PENDING REACTION ---
        self.react(&msg.chat_id, &msg.id, &self.config.reactions.pending)
            .await;

        // --- 5. ADMIN: RELOAD ---
        if invocation.command == "reload" && self.is_owner(&msg.sender_id) {
            self.registry.write().await.reload();
            self.react(&msg.chat_id, &msg.id, &self.config.reactions.success)
                .await;
            self.schedule_reaction_clear(&msg.chat_id, &msg.id);
            self.guard.lock().await.record_invocation(
                &msg.sender_id,
                &invocation.command,
                Instant::now(),
            );
            return;
        }

        // --- 6. RESOLVE ---
        let plugin = self.registry.read().await.resolve(&invocation.command);
        let Some(plugin) = plugin else {
            self.react(&msg.chat_id, &msg.id, &self.config.reactions.unknown)
                .await;
            self.schedule_reaction_clear(&msg.chat_id, &msg.id);
            return;
        };

        // --- 7. EXECUTE (error boundary) ---
        let ctx = CommandContext::new(
            self.transport.clone(),
            self.sent_ids.clone(),
            self.config.bot.prefix.clone(),
            known,
            self.started_at,
        );
        let exec_plugin = plugin.clone();
        let exec_invocation = invocation.clone();
        let exec_msg = msg.clone();
        let handle = tokio::spawn(async move {
            exec_plugin
                .execute(&ctx, &exec_invocation, &exec_msg)
                .await
        });

        let outcome = match handle.await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!(
                    "plugin '{}' failed on '{}': {e}",
                    plugin.name(),
                    invocation.command
                );
                Outcome::Failure
            }
            Err(join_err) => {
                error!(
                    "plugin '{}' panicked on '{}': {join_err}",
                    plugin.name(),
                    invocation.command
                );
                Outcome::Failure
            }
        };

        // --- 8. RESULT REACTION ---
        let emoji = match outcome {
            Outcome::Success => &self.config.reactions.success,
            Outcome::Failure => &self.config.reactions.failure,
        };
        self.react(&msg.chat_id, &msg.id, emoji).await;
        self.schedule_reaction_clear(&msg.chat_id, &msg.id);

        // --- 9. RECORD COOLDOWN ---
        // A failing command still consumes its slot.
        self.guard.lock().await.record_invocation(
            &msg.sender_id,
            &invocation.command,
            Instant::now(),
        );
    }
}
