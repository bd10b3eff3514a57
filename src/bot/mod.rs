//! Bot — the dispatcher tying transport, registry, and guard together.
//!
//! Pipelines for distinct inbound events interleave (one task per event);
//! steps within one event's pipeline are strictly ordered.

mod guard;
mod normalize;
mod pipeline;
pub mod registry;


use guard::CooldownGuard;
use registry::CommandRegistry;
use std::collections::HashSet;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use wren_core::{config::Config, traits::Transport};

pub struct Bot {
    pub(super) config: Config,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) registry: RwLock<CommandRegistry>,
    pub(super) guard: Mutex<CooldownGuard>,
    /// Ids of messages the bot sent — consulted by normalization to drop
    /// our own echo, pruned once the echo arrives.
    pub(super) sent_ids: Arc<Mutex<HashSet<String>>>,
    /// Invocations silently dropped by the cooldown guard.
    pub(super) suppressed: AtomicU64,
    pub(super) started_at: Instant,
}

impl Bot {
    pub fn new(config: Config, transport: Arc<dyn Transport>, registry: CommandRegistry) -> Self {
        let guard = CooldownGuard::new(
            Duration::from_millis(config.cooldown.reset_window_ms),
            Duration::from_millis(config.cooldown.retention_ms),
        );
        Self {
            config,
            transport,
            registry: RwLock::new(registry),
            guard: Mutex::new(guard),
            sent_ids: Arc::new(Mutex::new(HashSet::new())),
            suppressed: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Run the main event loop until ctrl-c or the transport closes.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        let mut rx = self
            .transport
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start transport: {e}"))?;

        if let Some(user) = self.transport.current_user_id().await {
            info!("logged in as {user}");
        }

        {
            let registry = self.registry.read().await;
            info!(
                "wren running | transport: {} | prefix: {} | {} commands",
                self.transport.name(),
                if self.config.bot.prefix.is_empty() {
                    "(none)".to_string()
                } else {
                    format!("'{}'", self.config.bot.prefix)
                },
                registry.command_names().len(),
            );
        }

        loop {
            tokio::select! {
                maybe_event = rx.recv() => match maybe_event {
                    Some(event) => {
                        let bot = self.clone();
                        tokio::spawn(async move {
                            bot.handle_event(event).await;
                        });
                    }
                    None => {
                        info!("transport event stream closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("received shutdown signal");
                    break;
                }
            }
        }

        // Outstanding reaction-removal tasks are abandoned here; they are
        // best-effort by contract.
        if let Err(e) = self.transport.stop().await {
            warn!("failed to stop transport: {e}");
        }
        Ok(())
    }

    /// Best-effort reaction, bounded by the configured send timeout.
    /// Failure never aborts the pipeline.
    pub(super) async fn react(&self, chat_id: &str, message_id: &str, emoji: &str) {
        let bound = Duration::from_millis(self.config.transport.send_timeout_ms);
        match tokio::time::timeout(bound, self.transport.send_reaction(chat_id, message_id, emoji))
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("reaction failed on {message_id}: {e}"),
            Err(_) => warn!("reaction timed out on {message_id}"),
        }
    }

    /// Schedule a fire-and-forget removal of the result reaction.
    pub(super) fn schedule_reaction_clear(&self, chat_id: &str, message_id: &str) {
        let transport = self.transport.clone();
        let delay = Duration::from_millis(self.config.reactions.clear_after_ms);
        let bound = Duration::from_millis(self.config.transport.send_timeout_ms);
        let chat_id = chat_id.to_string();
        let message_id = message_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Removal failures and timeouts are swallowed.
            let _ = tokio::time::timeout(bound, transport.send_reaction(&chat_id, &message_id, ""))
                .await;
        });
    }

    pub(super) fn is_owner(&self, sender_id: &str) -> bool {
        !self.config.bot.owner.is_empty() && sender_id == self.config.bot.owner
    }
}
