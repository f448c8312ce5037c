//! Configuration type definitions

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    metadata::{CommandHeader, DefaultExecutorMeta, ExecutorMeta, SenderKind},
    sender::LocalSender,
    Error, Result,
};

const DEFAULT_NAMESPACE: &str = "colonel";

// ═══════════════════════════════════════════════════════════════════════════
// COLOR MODE
// ═══════════════════════════════════════════════════════════════════════════

/// When rendered messages carry terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" => Ok(Self::Always),
            "never" | "off" => Ok(Self::Never),
            _ => Err(Error::InvalidConfig(format!(
                "Invalid color mode: {s}. Must be one of: auto, always, never"
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → global → project → env vars → CLI flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Fallback prefix handed to the host map.
    pub namespace: String,
    pub color: ColorMode,
    /// The sender CLI invocations run as.
    pub sender: SenderConfig,
    #[serde(rename = "command")]
    pub commands: Vec<CommandDecl>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            color: ColorMode::default(),
            sender: SenderConfig::default(),
            commands: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SenderConfig {
    pub name: String,
    pub kind: SenderKind,
    pub permissions: Vec<String>,
    pub op: bool,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            name: "CONSOLE".to_string(),
            kind: SenderKind::Console,
            permissions: Vec::new(),
            op: false,
        }
    }
}

impl SenderConfig {
    #[must_use]
    pub fn to_sender(&self) -> LocalSender {
        LocalSender::new(self.name.clone(), self.kind)
            .with_permissions(self.permissions.iter().cloned())
            .with_op(self.op)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMAND DECLARATIONS
// ═══════════════════════════════════════════════════════════════════════════

/// One `[[command]]` block.
///
/// The header is optional here so that a missing one surfaces as a
/// discovery error naming the block, not as a TOML error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandDecl {
    pub header: Option<CommandHeader>,
    #[serde(rename = "method")]
    pub methods: Vec<MethodDecl>,
}

/// One `[[command.method]]` entry: a reply template plus routing metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MethodDecl {
    pub name: String,
    /// Sent back when the method fires. Expands `{SENDER}`, `{LABEL}`,
    /// `{ARGS}` and positional `{0}`, `{1}`, ...
    pub reply: String,
    pub executor: Option<ExecutorMeta>,
    pub default: Option<DefaultExecutorMeta>,
}

// ═══════════════════════════════════════════════════════════════════════════
// PARTIAL CONFIG STRUCTURES (explicit-key merge semantics)
// ═══════════════════════════════════════════════════════════════════════════

/// Partial configuration with `Option<T>` fields for explicit-key merge semantics.
///
/// Only fields explicitly present in the TOML are `Some(value)`; missing
/// fields don't override lower-precedence values during merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub color: Option<ColorMode>,
    #[serde(default)]
    pub sender: Option<PartialSenderConfig>,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialSenderConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<SenderKind>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub op: Option<bool>,
}

impl Config {
    /// Merge partial config, only updating fields that are `Some(value)`.
    /// Declared commands are appended.
    pub fn merge_partial(&mut self, partial: PartialConfig) {
        if let Some(namespace) = partial.namespace {
            self.namespace = namespace;
        }
        if let Some(color) = partial.color {
            self.color = color;
        }
        if let Some(sender) = partial.sender {
            self.sender.merge_partial(sender);
        }
        self.commands.extend(partial.commands);
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if the namespace is empty or contains characters other
    /// than lowercase letters, digits, `-`, `_` and `.`.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "namespace cannot be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .namespace
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-_.".contains(*c)))
        {
            return Err(Error::InvalidConfig(format!(
                "namespace '{}' contains invalid character '{bad}'",
                self.namespace
            )));
        }
        if self.sender.name.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "sender.name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl SenderConfig {
    fn merge_partial(&mut self, partial: PartialSenderConfig) {
        if let Some(name) = partial.name {
            self.name = name;
        }
        if let Some(kind) = partial.kind {
            self.kind = kind;
        }
        if let Some(permissions) = partial.permissions {
            self.permissions = permissions;
        }
        if let Some(op) = partial.op {
            self.op = op;
        }
    }
}
