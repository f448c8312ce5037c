//! Command registry: the front door between handlers and the host.
//!
//! [`CommandRegistry`] discovers handlers, keeps one routing table per
//! command, and hands each table to the host wrapped in a [`CommandAdapter`].
//! The host is injected as a [`HostCommandMap`]; [`SimpleCommandMap`] is an
//! in-memory implementation that resolves labels and forwards invocations.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use im::OrdMap;
use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::{
    discovery::{discover, MetadataProvider},
    dispatch::{route, DispatchOutcome},
    message::MessageRenderer,
    sender::Sender,
    table::RoutingTable,
    Error, Result,
};

// ═══════════════════════════════════════════════════════════════════════════
// ADAPTER
// ═══════════════════════════════════════════════════════════════════════════

/// What the host sees of one registered command.
pub struct CommandAdapter {
    table: Arc<RoutingTable>,
    renderer: Arc<dyn MessageRenderer>,
}

impl CommandAdapter {
    pub fn new(table: RoutingTable, renderer: Arc<dyn MessageRenderer>) -> Self {
        Self {
            table: Arc::new(table),
            renderer,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.table.header().name
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.table.header().aliases
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.table.header().description
    }

    #[must_use]
    pub fn usage(&self) -> &str {
        &self.table.header().usage
    }

    #[must_use]
    pub const fn table(&self) -> &Arc<RoutingTable> {
        &self.table
    }

    /// Route an invocation and deliver its message, returning the outcome.
    pub fn run(&self, sender: &dyn Sender, label: &str, arguments: &[String]) -> DispatchOutcome {
        let outcome = route(&self.table, sender, label, arguments);
        if let Some(message) = outcome.message() {
            self.renderer.send_colored(sender, message);
        }
        outcome
    }

    /// Host entry point. Always reports "not handled" to the host.
    pub fn execute(&self, sender: &dyn Sender, label: &str, arguments: &[String]) -> bool {
        self.run(sender, label, arguments);
        false
    }

    /// Tab completion is not provided.
    pub fn tab_complete(
        &self,
        _sender: &dyn Sender,
        _label: &str,
        _arguments: &[String],
    ) -> Option<Vec<String>> {
        None
    }
}

impl fmt::Debug for CommandAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandAdapter")
            .field("name", &self.name())
            .field("aliases", &self.aliases().iter().join(","))
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HOST COMMAND MAP
// ═══════════════════════════════════════════════════════════════════════════

/// The host platform's command registry.
pub trait HostCommandMap: Send + Sync {
    /// Register `command`. Returns `false` when its primary name was taken
    /// and it is only reachable under `fallback_prefix:name`.
    fn register(&self, fallback_prefix: &str, command: Arc<CommandAdapter>) -> bool;

    /// Remove every label pointing at this exact `command`.
    ///
    /// Same-named commands registered under other prefixes keep their labels.
    fn unregister(&self, command: &Arc<CommandAdapter>) -> bool;
}

/// In-memory host: label table plus line dispatch.
///
/// Labels are lowercase. A command is always reachable as `prefix:name`;
/// its bare name and each alias are taken only when still free.
#[derive(Debug, Default)]
pub struct SimpleCommandMap {
    known: RwLock<OrdMap<String, Arc<CommandAdapter>>>,
}

impl SimpleCommandMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the command behind a label, ignoring case.
    pub fn get(&self, label: &str) -> Option<Arc<CommandAdapter>> {
        self.known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&label.to_lowercase())
            .cloned()
    }

    /// Every registered label, sorted.
    pub fn known_labels(&self) -> Vec<String> {
        self.known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Dispatch a raw command line such as `/eco give 10`.
    ///
    /// The line is split on whitespace; the first token is the label.
    pub fn dispatch(&self, sender: &dyn Sender, command_line: &str) -> Result<DispatchOutcome> {
        let mut tokens = command_line.split_whitespace();
        let label = tokens.next().unwrap_or_default();
        let arguments: Vec<String> = tokens.map(ToString::to_string).collect();
        self.dispatch_args(sender, label, &arguments)
    }

    /// Dispatch an already tokenised invocation. Arguments are passed
    /// through as given, including empty ones and ones containing spaces.
    /// A leading `/` on the label is ignored.
    pub fn dispatch_args(
        &self,
        sender: &dyn Sender,
        label: &str,
        arguments: &[String],
    ) -> Result<DispatchOutcome> {
        let label = label.strip_prefix('/').unwrap_or(label);
        if label.is_empty() {
            return Err(Error::NotFound("empty command line".to_string()));
        }

        let command = self
            .get(label)
            .ok_or_else(|| Error::NotFound(label.to_string()))?;

        debug!(label, command = command.name(), "Dispatching command");
        Ok(command.run(sender, label, arguments))
    }
}

impl HostCommandMap for SimpleCommandMap {
    fn register(&self, fallback_prefix: &str, command: Arc<CommandAdapter>) -> bool {
        let prefix = fallback_prefix.trim().to_lowercase();
        let name = command.name().to_lowercase();
        let mut known = self.known.write().unwrap_or_else(PoisonError::into_inner);

        known.insert(format!("{prefix}:{name}"), Arc::clone(&command));

        let registered = !known.contains_key(&name);
        if registered {
            known.insert(name, Arc::clone(&command));
        }

        for alias in command.aliases() {
            let alias = alias.to_lowercase();
            if !known.contains_key(&alias) {
                known.insert(alias, Arc::clone(&command));
            }
        }
        registered
    }

    fn unregister(&self, command: &Arc<CommandAdapter>) -> bool {
        let mut known = self.known.write().unwrap_or_else(PoisonError::into_inner);
        let before = known.len();
        let kept: OrdMap<String, Arc<CommandAdapter>> = known
            .iter()
            .filter(|(_, registered)| !Arc::ptr_eq(registered, command))
            .map(|(label, command)| (label.clone(), Arc::clone(command)))
            .collect();
        *known = kept;
        known.len() != before
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REGISTRY
// ═══════════════════════════════════════════════════════════════════════════

/// Owns one routing table per registered command name.
pub struct CommandRegistry {
    namespace: String,
    host: Arc<dyn HostCommandMap>,
    renderer: Arc<dyn MessageRenderer>,
    commands: RwLock<OrdMap<String, Arc<CommandAdapter>>>,
}

impl CommandRegistry {
    /// `namespace` is lowercased and used as the host's fallback prefix.
    pub fn new(
        namespace: impl Into<String>,
        host: Arc<dyn HostCommandMap>,
        renderer: Arc<dyn MessageRenderer>,
    ) -> Self {
        Self {
            namespace: namespace.into().trim().to_lowercase(),
            host,
            renderer,
            commands: RwLock::new(OrdMap::new()),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Discover one handler and register its command with the host.
    pub fn register(&self, handler: &dyn MetadataProvider) -> Result<Arc<CommandAdapter>> {
        let table = discover(handler)?;
        let mut commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        check_names(&commands, std::iter::once(table.header().name.as_str()))?;
        Ok(self.install(&mut commands, table))
    }

    /// Register several handlers; nothing is registered unless all of them
    /// discover cleanly and their names are free.
    pub fn register_all(&self, handlers: &[&dyn MetadataProvider]) -> Result<usize> {
        let tables = handlers
            .iter()
            .map(|handler| discover(*handler))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Names are checked and installed under one guard.
        let mut commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        check_names(
            &commands,
            tables.iter().map(|table| table.header().name.as_str()),
        )?;

        let count = tables.len();
        tables.into_iter().for_each(|table| {
            self.install(&mut commands, table);
        });
        Ok(count)
    }

    /// Drop a command's table and its host labels.
    pub fn unregister(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        let removed = self
            .commands
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        let Some(adapter) = removed else {
            return false;
        };
        self.host.unregister(&adapter);
        info!(command = %key, namespace = %self.namespace, "Unregistered command");
        true
    }

    pub fn adapter(&self, name: &str) -> Option<Arc<CommandAdapter>> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name.to_lowercase())
            .cloned()
    }

    pub fn table(&self, name: &str) -> Option<Arc<RoutingTable>> {
        self.adapter(name).map(|adapter| Arc::clone(adapter.table()))
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn install(
        &self,
        commands: &mut OrdMap<String, Arc<CommandAdapter>>,
        table: RoutingTable,
    ) -> Arc<CommandAdapter> {
        let key = table.header().name.to_lowercase();
        let adapter = Arc::new(CommandAdapter::new(table, Arc::clone(&self.renderer)));

        if !self.host.register(&self.namespace, Arc::clone(&adapter)) {
            warn!(
                command = %key,
                namespace = %self.namespace,
                "Command name taken on host, reachable only with namespace prefix"
            );
        }

        commands.insert(key.clone(), Arc::clone(&adapter));
        info!(command = %key, namespace = %self.namespace, "Registered command");
        adapter
    }
}

/// Reject empty names, repeats within `names`, and names already in `commands`.
fn check_names<'a>(
    commands: &OrdMap<String, Arc<CommandAdapter>>,
    names: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let names: Vec<String> = names.map(str::to_lowercase).collect();

    if names.iter().any(String::is_empty) {
        return Err(Error::InvalidConfig(
            "Command name cannot be empty".to_string(),
        ));
    }
    if let Some(duplicate) = names.iter().duplicates().next() {
        return Err(Error::DuplicateCommand(duplicate.clone()));
    }

    names
        .into_iter()
        .find(|name| commands.contains_key(name))
        .map_or(Ok(()), |name| Err(Error::DuplicateCommand(name)))
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("namespace", &self.namespace)
            .field("commands", &self.commands())
            .finish_non_exhaustive()
    }
}
