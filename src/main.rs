mod bot;

use bot::registry::CommandRegistry;
use bot::Bot;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use wren_core::{config, traits::Transport};
use wren_transport::ConsoleTransport;

#[derive(Parser)]
#[command(name = "wren", version, about = "wren — WhatsApp plugin-command bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot on the configured transport.
    Start,
    /// Show config, plugins, and the command table without connecting.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cfg.bot.log_level.clone())),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let transport: Arc<dyn Transport> = match cfg.transport.backend.as_str() {
                "console" => Arc::new(ConsoleTransport::new()),
                other => anyhow::bail!(
                    "unsupported transport backend '{other}'. \
                     Built-in: console. Real protocol clients implement the Transport trait."
                ),
            };

            let registry = CommandRegistry::new(wren_plugins::manifest());
            if registry.command_names().is_empty() {
                tracing::warn!("no commands registered — the bot will only answer admin reload");
            }

            let bot = Arc::new(Bot::new(cfg, transport, registry));
            bot.run().await?;
        }
        Commands::Status => {
            println!("wren — status\n");
            println!("config: {}", cli.config);
            println!(
                "prefix: {}",
                if cfg.bot.prefix.is_empty() {
                    "(none — match by command name)".to_string()
                } else {
                    format!("'{}'", cfg.bot.prefix)
                }
            );
            println!("transport: {}", cfg.transport.backend);
            println!(
                "cooldown: {}ms window / {}ms retention",
                cfg.cooldown.reset_window_ms, cfg.cooldown.retention_ms
            );
            println!(
                "owner: {}",
                if cfg.bot.owner.is_empty() {
                    "(unset — admin commands disabled)"
                } else {
                    &cfg.bot.owner
                }
            );
            println!();

            let registry = CommandRegistry::new(wren_plugins::manifest());
            for plugin in registry.plugins() {
                println!("  {:<8} → {}", plugin.name(), plugin.commands().join(", "));
            }
            println!(
                "\n{} commands across {} plugins",
                registry.command_names().len(),
                registry.plugins().len()
            );
        }
    }

    Ok(())
}
