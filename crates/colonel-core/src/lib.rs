//! # Colonel Core
//!
//! Declarative command routing: handlers describe their command header,
//! sub-executors and default executor as metadata, discovery compiles that
//! metadata into an immutable [`RoutingTable`], and [`route`] decides which
//! executor fires for an incoming argument list.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Layout
//!
//! - [`metadata`] - plain data describing headers and executor rules
//! - [`discovery`] - metadata providers and table construction
//! - [`dispatch`] - the five-step routing decision
//! - [`registry`] - front door owning one table per registered command
//! - [`message`] / [`color`] - placeholder templates and color codes
//! - [`config`] - layered configuration and TOML command declarations

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod metadata;
pub mod registry;
pub mod sender;
pub mod table;

pub use config::{ColorMode, Config, ConfigHandler, SenderConfig};
pub use discovery::{discover, Handle, Handler, HandlerMethod, MetadataProvider};
pub use dispatch::{route, DispatchOutcome, InvokedTarget};
pub use error::{DiscoveryError, Error, Result};
pub use message::{LegacyRenderer, MessageRenderer, PlainRenderer};
pub use metadata::{ArgumentBounds, CommandHeader, DefaultExecutorMeta, ExecutorMeta, SenderKind};
pub use registry::{CommandAdapter, CommandRegistry, HostCommandMap, SimpleCommandMap};
pub use sender::{LocalSender, Sender};
pub use table::{DefaultExecutorRule, ExecutorRule, RoutingTable};
