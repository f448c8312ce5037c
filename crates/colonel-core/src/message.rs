//! Message templates and their delivery.
//!
//! The engine fills exactly one placeholder per template before a message
//! leaves it; color markup is resolved afterwards by a [`MessageRenderer`].

use crate::{color, sender::Sender};

pub const PERMISSION_PLACEHOLDER: &str = "{PERMISSION}";
pub const USAGE_PLACEHOLDER: &str = "{USAGE}";
pub const EXECUTABLE_BY_PLACEHOLDER: &str = "{EXECUTABLE_BY}";

/// Fill the `{PERMISSION}` placeholder; `None` when no template is set.
pub(crate) fn permission_message(template: &str, permission: &str) -> Option<String> {
    fill(template, PERMISSION_PLACEHOLDER, permission)
}

/// Fill the `{USAGE}` placeholder; `None` unless both template and usage are set.
pub(crate) fn usage_message(template: &str, usage: &str) -> Option<String> {
    if usage.is_empty() {
        return None;
    }
    fill(template, USAGE_PLACEHOLDER, usage)
}

/// Fill the `{EXECUTABLE_BY}` placeholder; `None` when no template is set.
pub(crate) fn executable_by_message(template: &str, expected: &str) -> Option<String> {
    fill(template, EXECUTABLE_BY_PLACEHOLDER, expected)
}

fn fill(template: &str, placeholder: &str, value: &str) -> Option<String> {
    (!template.is_empty()).then(|| template.replace(placeholder, value))
}

/// Delivers colored text to a sender.
pub trait MessageRenderer: Send + Sync {
    fn send_colored(&self, sender: &dyn Sender, text: &str);
}

/// Translates `&` codes into `§` codes and hands the result to the sender.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyRenderer;

impl MessageRenderer for LegacyRenderer {
    fn send_colored(&self, sender: &dyn Sender, text: &str) {
        sender.send_message(&color::translate_alternate_codes(color::ALTERNATE, text));
    }
}

/// Removes all color markup before delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl MessageRenderer for PlainRenderer {
    fn send_colored(&self, sender: &dyn Sender, text: &str) {
        let translated = color::translate_alternate_codes(color::ALTERNATE, text);
        sender.send_message(&color::strip_codes(&translated));
    }
}
