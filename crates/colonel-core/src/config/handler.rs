//! `[[command]]` blocks as metadata providers.

use std::sync::Arc;

use super::types::{CommandDecl, MethodDecl};
use crate::{
    discovery::{Handle, HandlerMethod, MetadataProvider},
    message::MessageRenderer,
    metadata::CommandHeader,
    sender::Sender,
};

/// A declared command whose methods answer with their reply template.
pub struct ConfigHandler {
    decl: CommandDecl,
    renderer: Arc<dyn MessageRenderer>,
}

impl ConfigHandler {
    pub fn new(decl: CommandDecl, renderer: Arc<dyn MessageRenderer>) -> Self {
        Self { decl, renderer }
    }

    /// One handler per declared command, in declaration order.
    pub fn from_decls(
        decls: &[CommandDecl],
        renderer: &Arc<dyn MessageRenderer>,
    ) -> Vec<Self> {
        decls
            .iter()
            .map(|decl| Self::new(decl.clone(), Arc::clone(renderer)))
            .collect()
    }

    fn handle_for(&self, method: &MethodDecl) -> Handle {
        let reply = method.reply.clone();
        let renderer = Arc::clone(&self.renderer);
        Handle::new(move |sender, label, arguments| {
            if !reply.is_empty() {
                renderer.send_colored(sender, &expand_reply(&reply, sender, label, arguments));
            }
        })
    }
}

impl MetadataProvider for ConfigHandler {
    fn header(&self) -> Option<CommandHeader> {
        self.decl.header.clone()
    }

    fn methods(&self) -> Vec<HandlerMethod> {
        self.decl
            .methods
            .iter()
            .map(|method| HandlerMethod {
                name: method.name.clone(),
                executor: method.executor.clone(),
                default_executor: method.default.clone(),
                handle: self.handle_for(method),
            })
            .collect()
    }

    fn handler_name(&self) -> String {
        self.decl.header.as_ref().map_or_else(
            || "config command".to_string(),
            |header| format!("config command '{}'", header.name),
        )
    }
}

impl std::fmt::Debug for ConfigHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigHandler")
            .field("decl", &self.decl)
            .finish_non_exhaustive()
    }
}

/// Expand reply placeholders in a single pass; unknown ones stay literal.
fn expand_reply(template: &str, sender: &dyn Sender, label: &str, arguments: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match resolve(key, sender, label, arguments) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn resolve(key: &str, sender: &dyn Sender, label: &str, arguments: &[String]) -> Option<String> {
    match key {
        "SENDER" => Some(sender.name().to_string()),
        "LABEL" => Some(label.to_string()),
        "ARGS" => Some(arguments.join(" ")),
        _ => key
            .parse::<usize>()
            .ok()
            .and_then(|index| arguments.get(index).cloned()),
    }
}
