//! Colonel library interface
//!
//! Exposes the CLI's wiring and terminal renderer for integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app;
pub mod render;

pub use app::App;
pub use render::{resolve_color, AnsiRenderer};
