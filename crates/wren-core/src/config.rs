use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::WrenError;

/// Top-level wren configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub cooldown: CooldownConfig,
    #[serde(default)]
    pub reactions: ReactionConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Command prefix. Empty string enables prefix-less matching against
    /// registered command names.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Sender id allowed to run admin commands (reload). Empty disables them.
    #[serde(default)]
    pub owner: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            prefix: default_prefix(),
            owner: String::new(),
            log_level: default_log_level(),
        }
    }
}

/// Per-(sender, command) spam suppression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// Repeat invocations inside this window are suppressed.
    #[serde(default = "default_reset_window")]
    pub reset_window_ms: u64,
    /// Entries older than this are purged on each record pass.
    #[serde(default = "default_retention")]
    pub retention_ms: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            reset_window_ms: default_reset_window(),
            retention_ms: default_retention(),
        }
    }
}

/// Emoji feedback attached to the triggering message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionConfig {
    #[serde(default = "default_pending")]
    pub pending: String,
    #[serde(default = "default_success")]
    pub success: String,
    #[serde(default = "default_failure")]
    pub failure: String,
    /// Reaction for a command no plugin answers to.
    #[serde(default = "default_unknown")]
    pub unknown: String,
    /// Delay before the result reaction is removed again (best-effort).
    #[serde(default = "default_clear_after")]
    pub clear_after_ms: u64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            pending: default_pending(),
            success: default_success(),
            failure: default_failure(),
            unknown: default_unknown(),
            clear_after_ms: default_clear_after(),
        }
    }
}

/// Transport selection and send bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Upper bound on dispatcher-issued sends and reactions. A hung send
    /// counts as a delivery failure, it never stalls the pipeline.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            send_timeout_ms: default_send_timeout(),
        }
    }
}

fn default_name() -> String {
    "wren".to_string()
}

fn default_prefix() -> String {
    ".".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reset_window() -> u64 {
    3000
}

fn default_retention() -> u64 {
    60_000
}

fn default_pending() -> String {
    "⏳".to_string()
}

fn default_success() -> String {
    "✅".to_string()
}

fn default_failure() -> String {
    "⚠️".to_string()
}

fn default_unknown() -> String {
    "❓".to_string()
}

fn default_clear_after() -> u64 {
    2500
}

fn default_backend() -> String {
    "console".to_string()
}

fn default_send_timeout() -> u64 {
    5000
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, WrenError> {
    let path = Path::new(path);
    if !path.exists() {
        info!("config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| WrenError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| WrenError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
