//! Command registry — owns the plugins and the keyword → plugin table.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use wren_core::traits::{Plugin, PluginCtor};

pub struct CommandRegistry {
    /// Static plugin constructors; re-run on `reload()`.
    manifest: Vec<PluginCtor>,
    /// Plugins with at least one bound command, load order.
    plugins: Vec<Arc<dyn Plugin>>,
    /// Command keyword → owning plugin. Keys are lowercase.
    bindings: HashMap<String, Arc<dyn Plugin>>,
    /// Bound keywords in registration order, for prefix-less matching
    /// and menu rendering.
    order: Vec<String>,
}

impl CommandRegistry {
    /// Build a registry and run plugin discovery over the manifest.
    pub fn new(manifest: Vec<PluginCtor>) -> Self {
        let mut registry = Self {
            manifest,
            plugins: Vec::new(),
            bindings: HashMap::new(),
            order: Vec::new(),
        };
        registry.load();
        registry
    }

    /// Run every constructor in the manifest. One failing plugin never
    /// prevents the rest from loading.
    fn load(&mut self) {
        for ctor in self.manifest.clone() {
            match ctor() {
                Ok(plugin) => {
                    self.register(plugin);
                }
                Err(e) => error!("plugin construction failed, skipping: {e}"),
            }
        }
        info!(
            "registry loaded: {} plugins, {} commands",
            self.plugins.len(),
            self.order.len()
        );
    }

    /// Bind a plugin's command names. First registrant wins per name:
    /// already-claimed names are skipped with a warning, the plugin's
    /// remaining names still bind. Returns the number of names bound.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> usize {
        if plugin.commands().is_empty() {
            warn!("plugin '{}' declares no commands, rejected", plugin.name());
            return 0;
        }

        let plugin: Arc<dyn Plugin> = Arc::from(plugin);
        let mut bound = 0;
        for name in plugin.commands() {
            let keyword = name.to_lowercase();
            if let Some(existing) = self.bindings.get(&keyword) {
                warn!(
                    "command '{keyword}' already claimed by '{}', skipping it for '{}'",
                    existing.name(),
                    plugin.name()
                );
                continue;
            }
            self.bindings.insert(keyword.clone(), plugin.clone());
            self.order.push(keyword);
            bound += 1;
        }

        if bound > 0 {
            self.plugins.push(plugin);
        }
        bound
    }

    /// Exact lookup. Callers lowercase the name during classification.
    pub fn resolve(&self, command: &str) -> Option<Arc<dyn Plugin>> {
        self.bindings.get(command).cloned()
    }

    /// Bound command keywords in registration order.
    pub fn command_names(&self) -> &[String] {
        &self.order
    }

    /// Loaded plugins, for status listings.
    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    /// Drop all bindings and re-run discovery. The registry stays usable
    /// whatever individual constructors do.
    pub fn reload(&mut self) {
        info!("reloading plugins");
        self.plugins.clear();
        self.bindings.clear();
        self.order.clear();
        self.load();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wren_core::{
        context::CommandContext,
        error::WrenError,
        message::{CommandInvocation, InboundMessage, Outcome},
    };

    struct StubPlugin {
        name: &'static str,
        commands: &'static [&'static str],
    }

    #[async_trait]
    impl Plugin for StubPlugin {
        fn name(&self) -> &str {
            self.name
        }

        fn commands(&self) -> &[&str] {
            self.commands
        }

        async fn execute(
            &self,
            _ctx: &CommandContext,
            _invocation: &CommandInvocation,
            _message: &InboundMessage,
        ) -> Result<Outcome, WrenError> {
            Ok(Outcome::Success)
        }
    }

    fn plugin_a() -> Result<Box<dyn Plugin>, WrenError> {
        Ok(Box::new(StubPlugin {
            name: "a",
            commands: &["x", "y"],
        }))
    }

    fn plugin_b() -> Result<Box<dyn Plugin>, WrenError> {
        Ok(Box::new(StubPlugin {
            name: "b",
            commands: &["y", "z"],
        }))
    }

    fn broken_plugin() -> Result<Box<dyn Plugin>, WrenError> {
        Err(WrenError::Plugin("construction exploded".to_string()))
    }

    #[test]
    fn test_first_registrant_wins_on_conflict() {
        let registry = CommandRegistry::new(vec![plugin_a, plugin_b]);
        assert_eq!(registry.resolve("x").unwrap().name(), "a");
        assert_eq!(registry.resolve("y").unwrap().name(), "a");
        assert_eq!(registry.resolve("z").unwrap().name(), "b");
    }

    #[test]
    fn test_register_returns_bound_count() {
        let mut registry = CommandRegistry::new(vec![]);
        assert_eq!(registry.register(plugin_a().unwrap()), 2);
        // Only "z" is still free.
        assert_eq!(registry.register(plugin_b().unwrap()), 1);
    }

    #[test]
    fn test_empty_command_set_rejected() {
        let mut registry = CommandRegistry::new(vec![]);
        let bound = registry.register(Box::new(StubPlugin {
            name: "hollow",
            commands: &[],
        }));
        assert_eq!(bound, 0);
        assert!(registry.plugins().is_empty());
    }

    #[test]
    fn test_command_names_keep_registration_order() {
        let registry = CommandRegistry::new(vec![plugin_a, plugin_b]);
        assert_eq!(registry.command_names(), &["x", "y", "z"]);
    }

    #[test]
    fn test_names_bound_lowercase() {
        let mut registry = CommandRegistry::new(vec![]);
        registry.register(Box::new(StubPlugin {
            name: "shouty",
            commands: &["Ping"],
        }));
        assert!(registry.resolve("ping").is_some());
        assert!(registry.resolve("Ping").is_none(), "lookup is exact");
    }

    #[test]
    fn test_broken_ctor_skipped_others_load() {
        let registry = CommandRegistry::new(vec![plugin_a, broken_plugin, plugin_b]);
        assert_eq!(registry.plugins().len(), 2);
        assert!(registry.resolve("x").is_some());
        assert!(registry.resolve("z").is_some());
    }

    #[test]
    fn test_reload_rebuilds_bindings() {
        let mut registry = CommandRegistry::new(vec![plugin_a]);
        assert_eq!(registry.command_names().len(), 2);
        registry.reload();
        assert_eq!(registry.command_names(), &["x", "y"]);
        assert_eq!(registry.resolve("x").unwrap().name(), "a");
    }
}
