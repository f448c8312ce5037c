//! Routing tables: the compiled, immutable form of one handler.

use crate::{
    discovery::Handle,
    metadata::{CommandHeader, DefaultExecutorMeta, ExecutorMeta},
};

/// A sub-executor: metadata plus the method it invokes.
#[derive(Debug, Clone)]
pub struct ExecutorRule {
    method: String,
    meta: ExecutorMeta,
    handle: Handle,
}

impl ExecutorRule {
    pub(crate) const fn new(method: String, meta: ExecutorMeta, handle: Handle) -> Self {
        Self {
            method,
            meta,
            handle,
        }
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub const fn meta(&self) -> &ExecutorMeta {
        &self.meta
    }

    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// The fallback executor.
#[derive(Debug, Clone)]
pub struct DefaultExecutorRule {
    method: String,
    meta: DefaultExecutorMeta,
    handle: Handle,
}

impl DefaultExecutorRule {
    pub(crate) const fn new(method: String, meta: DefaultExecutorMeta, handle: Handle) -> Self {
        Self {
            method,
            meta,
            handle,
        }
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub const fn meta(&self) -> &DefaultExecutorMeta {
        &self.meta
    }

    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// Header, ordered sub-executors and optional default of one command.
///
/// Built by [`crate::discover`]; there is no way to mutate it afterwards.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    header: CommandHeader,
    executors: Vec<ExecutorRule>,
    default: Option<DefaultExecutorRule>,
}

impl RoutingTable {
    pub(crate) const fn new(
        header: CommandHeader,
        executors: Vec<ExecutorRule>,
        default: Option<DefaultExecutorRule>,
    ) -> Self {
        Self {
            header,
            executors,
            default,
        }
    }

    #[must_use]
    pub const fn header(&self) -> &CommandHeader {
        &self.header
    }

    /// Sub-executors in match order.
    #[must_use]
    pub fn executors(&self) -> &[ExecutorRule] {
        &self.executors
    }

    #[must_use]
    pub const fn default_executor(&self) -> Option<&DefaultExecutorRule> {
        self.default.as_ref()
    }
}
