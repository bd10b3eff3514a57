//! # wren-plugins
//!
//! Built-in command plugins and the static plugin manifest.
//!
//! The manifest replaces runtime directory scanning: adding a plugin means
//! adding its constructor here. A constructor may fail; the registry skips
//! that plugin and keeps loading the rest.

mod echo;
mod jid;
mod menu;
mod ping;
mod uptime;

pub use echo::EchoPlugin;
pub use jid::JidPlugin;
pub use menu::MenuPlugin;
pub use ping::PingPlugin;
pub use uptime::UptimePlugin;

use wren_core::traits::PluginCtor;

/// All built-in plugins, in registration order.
pub fn manifest() -> Vec<PluginCtor> {
    vec![
        || Ok(Box::new(PingPlugin::new())),
        || Ok(Box::new(UptimePlugin::new())),
        || Ok(Box::new(MenuPlugin::new())),
        || Ok(Box::new(EchoPlugin::new())),
        || Ok(Box::new(JidPlugin::new())),
    ]
}
