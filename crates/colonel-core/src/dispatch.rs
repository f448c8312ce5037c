//! The dispatch engine: deciding which executor of a table fires.
//!
//! [`route`] is a pure decision over the table, the sender's capabilities and
//! the argument list. It keeps no state between calls; the only effect it
//! has is invoking the chosen handle.
//!
//! # Decision order
//!
//! 1. Command permission gate
//! 2. Empty argument list skips straight to the default executor
//! 3. Sub-executors in discovery order, selected by the first argument
//! 4. Default executor, gated by sender kind and whole-argument bounds
//! 5. Header usage message
//!
//! A sub-executor is a candidate when the first argument matches its name
//! or matches none of its aliases. A rule whose alias matched but whose name
//! did not stops the scan silently. A candidate ends the scan too: it is
//! denied, it fires, or it shows its own usage.

use tracing::{debug, trace};

use crate::{
    message,
    sender::Sender,
    table::{DefaultExecutorRule, ExecutorRule, RoutingTable},
};

/// Which executor fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokedTarget {
    /// A sub-executor, by its metadata name.
    Executor { name: String },
    Default,
}

/// Result of routing one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handle ran with these arguments.
    Invoked {
        target: InvokedTarget,
        arguments: Vec<String>,
    },
    /// A permission or sender-kind gate refused, with the rendered template.
    Denied(String),
    /// Arguments did not fit, with the rendered usage template.
    UsageShown(String),
    /// Nothing ran and there is nothing to show.
    Silent,
}

impl DispatchOutcome {
    /// The message to deliver to the sender, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Denied(message) | Self::UsageShown(message) => Some(message),
            Self::Invoked { .. } | Self::Silent => None,
        }
    }

    #[must_use]
    pub const fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked { .. })
    }
}

/// Route one invocation of `table`'s command.
///
/// `label` is the name or alias the sender typed; it is passed through to
/// the handle untouched. Panics inside a handle propagate to the caller.
pub fn route(
    table: &RoutingTable,
    sender: &dyn Sender,
    label: &str,
    arguments: &[String],
) -> DispatchOutcome {
    let header = table.header();
    trace!(
        command = %header.name,
        sender = sender.name(),
        label,
        arguments = arguments.len(),
        "Routing command"
    );

    if let Some(denied) = permission_gate(sender, &header.permission, &header.permission_message) {
        debug!(command = %header.name, permission = %header.permission, "Command permission denied");
        return denied;
    }

    if let Some(first) = arguments.first() {
        if let Some(outcome) = route_executors(table.executors(), sender, label, first, arguments) {
            return outcome;
        }
    }

    if let Some(outcome) = table
        .default_executor()
        .and_then(|rule| route_default(rule, sender, label, arguments))
    {
        return outcome;
    }

    debug!(command = %header.name, "No executor fired, falling back to header usage");
    usage(&header.usage_message, &header.usage)
}

/// Step 3. `None` only when there are no sub-executors to try.
fn route_executors(
    rules: &[ExecutorRule],
    sender: &dyn Sender,
    label: &str,
    first: &str,
    arguments: &[String],
) -> Option<DispatchOutcome> {
    // The first rule reached always decides the outcome.
    let rule = rules.first()?;
    let meta = rule.meta();

    let name_matches = eq_ignore_case(first, &meta.name);
    let alias_matches = meta.aliases.iter().any(|alias| eq_ignore_case(first, alias));
    if !name_matches && alias_matches {
        debug!(executor = %meta.name, token = first, "Alias matched without name, stopping scan");
        return Some(DispatchOutcome::Silent);
    }

    if let Some(denied) = permission_gate(sender, &meta.permission, &meta.permission_message) {
        debug!(executor = %meta.name, permission = %meta.permission, "Executor permission denied");
        return Some(denied);
    }

    let sub_arguments = arguments.get(1..).unwrap_or_default();
    if meta.bounds.contains(sub_arguments.len()) {
        debug!(executor = %meta.name, method = rule.method(), "Invoking executor");
        rule.handle().invoke(sender, label, sub_arguments);
        return Some(DispatchOutcome::Invoked {
            target: InvokedTarget::Executor {
                name: meta.name.clone(),
            },
            arguments: sub_arguments.to_vec(),
        });
    }

    debug!(
        executor = %meta.name,
        given = sub_arguments.len(),
        "Executor argument count out of bounds"
    );
    Some(usage(&meta.usage_message, &meta.usage))
}

/// Step 4. `None` falls through to the header usage.
fn route_default(
    rule: &DefaultExecutorRule,
    sender: &dyn Sender,
    label: &str,
    arguments: &[String],
) -> Option<DispatchOutcome> {
    let meta = rule.meta();

    if !meta.executable_by.admits(sender.kind()) {
        debug!(
            expected = %meta.executable_by,
            actual = %sender.kind(),
            "Sender kind cannot run default executor"
        );
        return message::executable_by_message(
            &meta.executable_by_message,
            &meta.executable_by.to_string(),
        )
        .map(DispatchOutcome::Denied);
    }

    if !meta.bounds.contains(arguments.len()) {
        debug!(given = arguments.len(), "Default executor argument count out of bounds");
        return None;
    }

    debug!(method = rule.method(), "Invoking default executor");
    rule.handle().invoke(sender, label, arguments);
    Some(DispatchOutcome::Invoked {
        target: InvokedTarget::Default,
        arguments: arguments.to_vec(),
    })
}

/// `Some` when `permission` is set and the sender lacks it.
fn permission_gate(
    sender: &dyn Sender,
    permission: &str,
    template: &str,
) -> Option<DispatchOutcome> {
    if permission.is_empty() || sender.has_permission(permission) {
        return None;
    }
    Some(
        message::permission_message(template, permission)
            .map_or(DispatchOutcome::Silent, DispatchOutcome::Denied),
    )
}

fn usage(template: &str, usage: &str) -> DispatchOutcome {
    message::usage_message(template, usage).map_or(DispatchOutcome::Silent, DispatchOutcome::UsageShown)
}

/// Char-by-char comparison under simple (one-to-one) case mapping.
///
/// Multi-char expansions such as `ß` to `SS` never match.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y || simple_upper(x) == simple_upper(y) || simple_lower(x) == simple_lower(y)
        })
}

fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

// `İ` lowercases to `i` plus a combining dot; its simple mapping is the `i`.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
