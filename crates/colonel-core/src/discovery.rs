//! Executor discovery: turning a handler's metadata into a [`RoutingTable`].
//!
//! A handler exposes its metadata through [`MetadataProvider`]: a command
//! header plus an ordered list of methods, each carrying sub-executor
//! metadata, default-executor metadata, or neither. Every method is paired
//! with a [`Handle`], the bound closure that runs it. Discovery never calls a
//! handle.
//!
//! Two providers ship with the crate: the in-code [`Handler`] builder and
//! [`crate::ConfigHandler`] for TOML declarations.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    error::DiscoveryError,
    metadata::{CommandHeader, DefaultExecutorMeta, ExecutorMeta},
    sender::Sender,
    table::{DefaultExecutorRule, ExecutorRule, RoutingTable},
};

/// Bound invocation target of an executor: `(sender, label, arguments)`.
///
/// Panics raised inside the closure are not caught by the engine.
#[derive(Clone)]
pub struct Handle(Arc<dyn Fn(&dyn Sender, &str, &[String]) + Send + Sync>);

impl Handle {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Sender, &str, &[String]) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A handle that does nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|_, _, _| {})
    }

    pub fn invoke(&self, sender: &dyn Sender, label: &str, arguments: &[String]) {
        (self.0)(sender, label, arguments);
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handle(..)")
    }
}

/// One method of a handler together with whatever metadata it carries.
#[derive(Debug, Clone)]
pub struct HandlerMethod {
    pub name: String,
    pub executor: Option<ExecutorMeta>,
    pub default_executor: Option<DefaultExecutorMeta>,
    pub handle: Handle,
}

impl HandlerMethod {
    /// A method carrying no routing metadata.
    pub fn plain(name: impl Into<String>, handle: Handle) -> Self {
        Self {
            name: name.into(),
            executor: None,
            default_executor: None,
            handle,
        }
    }

    #[must_use]
    pub fn with_executor(mut self, meta: ExecutorMeta) -> Self {
        self.executor = Some(meta);
        self
    }

    #[must_use]
    pub fn with_default_executor(mut self, meta: DefaultExecutorMeta) -> Self {
        self.default_executor = Some(meta);
        self
    }
}

/// Source of routing metadata for one handler.
pub trait MetadataProvider {
    /// The command header, if the handler declares one.
    fn header(&self) -> Option<CommandHeader>;

    /// Methods in their natural enumeration order.
    ///
    /// This order is the match order of the resulting table.
    fn methods(&self) -> Vec<HandlerMethod>;

    /// Name used in errors and logs.
    fn handler_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Compile a handler's metadata into an immutable routing table.
///
/// A method carrying sub-executor metadata always becomes a sub-executor.
/// Otherwise a default-executor marker makes it the default; a second one
/// fails with [`DiscoveryError::MultipleDefaultExecutors`].
pub fn discover(provider: &dyn MetadataProvider) -> Result<RoutingTable, DiscoveryError> {
    let handler = provider.handler_name();
    let header = provider
        .header()
        .ok_or_else(|| DiscoveryError::MissingHeader {
            handler: handler.clone(),
        })?;

    let mut executors = Vec::new();
    let mut default: Option<DefaultExecutorRule> = None;

    for method in provider.methods() {
        if let Some(meta) = method.executor {
            executors.push(ExecutorRule::new(method.name, meta, method.handle));
            continue;
        }
        let Some(meta) = method.default_executor else {
            continue;
        };
        if let Some(existing) = &default {
            return Err(DiscoveryError::MultipleDefaultExecutors {
                handler,
                first: existing.method().to_string(),
                second: method.name,
            });
        }
        default = Some(DefaultExecutorRule::new(method.name, meta, method.handle));
    }

    debug!(
        handler = %handler,
        command = %header.name,
        executors = executors.len(),
        has_default = default.is_some(),
        "Discovered command executors"
    );

    Ok(RoutingTable::new(header, executors, default))
}

// ═══════════════════════════════════════════════════════════════════════════
// IN-CODE HANDLER BUILDER
// ═══════════════════════════════════════════════════════════════════════════

/// Handler declared in code, method by method.
///
/// ```rust
/// use colonel_core::{discover, ArgumentBounds, CommandHeader, ExecutorMeta, Handler};
///
/// let handler = Handler::new("Economy")
///     .header(CommandHeader::new("eco"))
///     .executor(
///         "give",
///         ExecutorMeta::new("give").with_bounds(ArgumentBounds::exactly(1)),
///         |sender, _label, args| sender.send_message(&format!("gave {}", args[0])),
///     );
///
/// let table = discover(&handler).map_err(|e| e.to_string())?;
/// assert_eq!(table.executors().len(), 1);
/// # Ok::<(), String>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Handler {
    name: String,
    header: Option<CommandHeader>,
    methods: Vec<HandlerMethod>,
}

impl Handler {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header(mut self, header: CommandHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Add a method marked as a sub-executor.
    #[must_use]
    pub fn executor<F>(mut self, method: impl Into<String>, meta: ExecutorMeta, f: F) -> Self
    where
        F: Fn(&dyn Sender, &str, &[String]) + Send + Sync + 'static,
    {
        self.methods
            .push(HandlerMethod::plain(method, Handle::new(f)).with_executor(meta));
        self
    }

    /// Add a method marked as the default executor.
    #[must_use]
    pub fn default_executor<F>(
        mut self,
        method: impl Into<String>,
        meta: DefaultExecutorMeta,
        f: F,
    ) -> Self
    where
        F: Fn(&dyn Sender, &str, &[String]) + Send + Sync + 'static,
    {
        self.methods
            .push(HandlerMethod::plain(method, Handle::new(f)).with_default_executor(meta));
        self
    }

    /// Add an arbitrary method, including ones without metadata.
    #[must_use]
    pub fn method(mut self, method: HandlerMethod) -> Self {
        self.methods.push(method);
        self
    }
}

impl MetadataProvider for Handler {
    fn header(&self) -> Option<CommandHeader> {
        self.header.clone()
    }

    fn methods(&self) -> Vec<HandlerMethod> {
        self.methods.clone()
    }

    fn handler_name(&self) -> String {
        self.name.clone()
    }
}
