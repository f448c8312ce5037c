//! Command senders: whoever invoked a command.

use std::{collections::BTreeSet, sync::Mutex};

use crate::metadata::SenderKind;

/// Capabilities the engine needs from an invoker.
pub trait Sender {
    /// Display name, e.g. a player name or `CONSOLE`.
    fn name(&self) -> &str;

    /// Category used against a default executor's `executable_by`.
    fn kind(&self) -> SenderKind;

    fn has_permission(&self, permission: &str) -> bool;

    /// Deliver already-rendered text to the sender.
    fn send_message(&self, message: &str);
}

/// In-process sender holding a fixed permission set and recording every
/// message it receives.
///
/// Operators hold every permission.
#[derive(Debug, Default)]
pub struct LocalSender {
    name: String,
    kind: SenderKind,
    permissions: BTreeSet<String>,
    op: bool,
    inbox: Mutex<Vec<String>>,
}

impl LocalSender {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SenderKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// The server console: operator, console kind.
    #[must_use]
    pub fn console() -> Self {
        Self::new("CONSOLE", SenderKind::Console).with_op(true)
    }

    #[must_use]
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, SenderKind::Player)
    }

    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    #[must_use]
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_op(mut self, op: bool) -> Self {
        self.op = op;
        self
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.inbox
            .lock()
            .map(|inbox| inbox.clone())
            .unwrap_or_default()
    }

    /// Remove and return the received messages.
    pub fn take_messages(&self) -> Vec<String> {
        self.inbox
            .lock()
            .map(|mut inbox| std::mem::take(&mut *inbox))
            .unwrap_or_default()
    }
}

impl Sender for LocalSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        self.kind
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.op || self.permissions.contains(permission)
    }

    fn send_message(&self, message: &str) {
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.push(message.to_string());
        }
    }
}
