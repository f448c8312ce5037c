//! Command metadata: the plain data a handler declares about itself.
//!
//! Nothing here knows how the metadata was attached to a handler; see
//! [`crate::discovery`] for the providers that produce it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// SENDER KIND
// ═══════════════════════════════════════════════════════════════════════════

/// Category of invoker a default executor may be restricted to.
///
/// `Display` yields the host type name substituted for `{EXECUTABLE_BY}`;
/// parsing accepts that name or a short form, ignoring case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SenderKind {
    #[default]
    #[strum(to_string = "CommandSender", serialize = "any")]
    Any,
    #[strum(to_string = "Player")]
    Player,
    #[strum(to_string = "ConsoleCommandSender", serialize = "console")]
    Console,
    #[strum(
        to_string = "RemoteConsoleCommandSender",
        serialize = "rcon",
        serialize = "remote-console"
    )]
    RemoteConsole,
    #[strum(
        to_string = "BlockCommandSender",
        serialize = "block",
        serialize = "command-block"
    )]
    CommandBlock,
    #[strum(to_string = "ProxiedCommandSender", serialize = "proxied")]
    Proxied,
}

impl SenderKind {
    /// Whether a sender of `kind` satisfies this restriction.
    #[must_use]
    pub fn admits(self, kind: Self) -> bool {
        self == Self::Any || self == kind
    }

    /// Parse a sender kind, reporting the accepted forms on failure.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::InvalidConfig(format!(
                "Invalid sender kind: {s}. Must be one of: any, player, console, rcon, block, proxied"
            ))
        })
    }
}

impl Serialize for SenderKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SenderKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ARGUMENT BOUNDS
// ═══════════════════════════════════════════════════════════════════════════

/// Inclusive argument-count range; `None` is unbounded on that side.
///
/// In declarations each side is written as an integer where `-1` means
/// unbounded, e.g. `min_arguments = 1`, `max_arguments = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ArgumentBounds {
    #[serde(rename = "min_arguments", default, with = "raw_bound")]
    pub min: Option<usize>,
    #[serde(rename = "max_arguments", default, with = "raw_bound")]
    pub max: Option<usize>,
}

impl ArgumentBounds {
    /// No restriction on either side.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub const fn exactly(count: usize) -> Self {
        Self::between(count, count)
    }

    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    #[must_use]
    pub const fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Build bounds from the integer form, where `-1` is unbounded.
    pub fn from_raw(min: i64, max: i64) -> Result<Self> {
        Ok(Self {
            min: raw_bound::parse(min).map_err(Error::InvalidConfig)?,
            max: raw_bound::parse(max).map_err(Error::InvalidConfig)?,
        })
    }

    /// Whether `count` arguments fall inside the range.
    #[must_use]
    pub fn contains(&self, count: usize) -> bool {
        self.min.map_or(true, |min| count >= min) && self.max.map_or(true, |max| count <= max)
    }
}

mod raw_bound {
    use serde::{Deserialize, Deserializer, Serializer};

    const UNBOUNDED: i64 = -1;

    pub fn parse(raw: i64) -> Result<Option<usize>, String> {
        match raw {
            UNBOUNDED => Ok(None),
            n if n < 0 => Err(format!(
                "Invalid argument bound: {n}. Must be -1 (unbounded) or non-negative"
            )),
            n => usize::try_from(n)
                .map(Some)
                .map_err(|e| format!("Invalid argument bound: {n}: {e}")),
        }
    }

    pub fn serialize<S>(bound: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bound {
            None => serializer.serialize_i64(UNBOUNDED),
            Some(n) => {
                let n = u64::try_from(*n).map_err(serde::ser::Error::custom)?;
                serializer.serialize_u64(n)
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        parse(raw).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMAND HEADER
// ═══════════════════════════════════════════════════════════════════════════

/// Header attached to a handler: the command's identity and its gates.
///
/// Empty strings mean "unset". An empty `permission` disables command-level
/// gating; an empty message makes the matching outcome silent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandHeader {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub usage: String,
    pub usage_message: String,
    pub permission: String,
    pub permission_message: String,
}

impl CommandHeader {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the usage string and the template it is substituted into.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>, message: impl Into<String>) -> Self {
        self.usage = usage.into();
        self.usage_message = message.into();
        self
    }

    /// Set the permission token and the template shown when it is missing.
    #[must_use]
    pub fn with_permission(
        mut self,
        permission: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.permission = permission.into();
        self.permission_message = message.into();
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EXECUTOR METADATA
// ═══════════════════════════════════════════════════════════════════════════

/// Metadata of a sub-executor, selected by the first argument token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorMeta {
    pub name: String,
    pub aliases: Vec<String>,
    pub permission: String,
    pub permission_message: String,
    #[serde(flatten)]
    pub bounds: ArgumentBounds,
    pub usage: String,
    pub usage_message: String,
}

impl ExecutorMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_permission(
        mut self,
        permission: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.permission = permission.into();
        self.permission_message = message.into();
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, bounds: ArgumentBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>, message: impl Into<String>) -> Self {
        self.usage = usage.into();
        self.usage_message = message.into();
        self
    }
}

/// Metadata of the fallback executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultExecutorMeta {
    pub executable_by: SenderKind,
    pub executable_by_message: String,
    #[serde(flatten)]
    pub bounds: ArgumentBounds,
}

impl DefaultExecutorMeta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the executor to one sender kind.
    #[must_use]
    pub fn executable_by(mut self, kind: SenderKind, message: impl Into<String>) -> Self {
        self.executable_by = kind;
        self.executable_by_message = message.into();
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, bounds: ArgumentBounds) -> Self {
        self.bounds = bounds;
        self
    }
}
