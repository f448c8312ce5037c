//! Wiring: configuration → renderer → host map → registry.

use std::sync::Arc;

use colonel_core::{
    CommandRegistry, Config, ConfigHandler, MessageRenderer, MetadataProvider, SimpleCommandMap,
};

use crate::render::AnsiRenderer;

/// Everything a CLI invocation needs, with every declared command registered.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub host: Arc<SimpleCommandMap>,
    pub registry: CommandRegistry,
}

impl App {
    /// Register every `[[command]]` of `config`.
    ///
    /// # Errors
    ///
    /// Fails without registering anything if a declaration does not
    /// discover or two declarations share a name.
    pub fn build(config: Config, renderer: AnsiRenderer) -> colonel_core::Result<Self> {
        let renderer: Arc<dyn MessageRenderer> = Arc::new(renderer);
        let host = Arc::new(SimpleCommandMap::new());
        let registry = CommandRegistry::new(
            config.namespace.clone(),
            Arc::clone(&host) as Arc<dyn colonel_core::HostCommandMap>,
            Arc::clone(&renderer),
        );

        let handlers = ConfigHandler::from_decls(&config.commands, &renderer);
        let providers: Vec<&dyn MetadataProvider> = handlers
            .iter()
            .map(|handler| handler as &dyn MetadataProvider)
            .collect();
        registry.register_all(&providers)?;

        Ok(Self {
            config,
            host,
            registry,
        })
    }
}
