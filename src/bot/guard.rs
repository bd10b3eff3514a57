//! Spam/cooldown guard — per (sender, command) suppression.
//!
//! Best-effort abuse mitigation, not a security boundary: two events for
//! the same pair racing through the pipeline before either records its
//! invocation can both pass, and that is fine.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct CooldownGuard {
    /// Repeat invocations inside this window are suppressed.
    reset_window: Duration,
    /// Entries older than this are purged on each record pass.
    retention: Duration,
    /// `"{sender}:{command}"` → last invocation time.
    entries: HashMap<String, Instant>,
}

fn key(sender_id: &str, command: &str) -> String {
    format!("{sender_id}:{command}")
}

impl CooldownGuard {
    pub fn new(reset_window: Duration, retention: Duration) -> Self {
        Self {
            reset_window,
            retention,
            entries: HashMap::new(),
        }
    }

    /// Whether this (sender, command) pair is still cooling down.
    /// Read-only; recording happens separately at the end of the pipeline.
    pub fn should_suppress(&self, sender_id: &str, command: &str, now: Instant) -> bool {
        match self.entries.get(&key(sender_id, command)) {
            Some(&last) => now.duration_since(last) < self.reset_window,
            None => false,
        }
    }

    /// Upsert the pair's last-invocation time, then purge stale entries.
    ///
    /// The purge is a full scan — cardinality is the number of distinct
    /// (sender, command) pairs seen within the retention horizon, small
    /// in practice.
    pub fn record_invocation(&mut self, sender_id: &str, command: &str, now: Instant) {
        self.entries.insert(key(sender_id, command), now);
        let retention = self.retention;
        self.entries
            .retain(|_, last| now.duration_since(*last) < retention);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
