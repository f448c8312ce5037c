//! Configuration loading and TOML command declarations
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/colonel/config.toml
//! 3. Project config: ./colonel.toml, or the file given with `--config`
//! 4. Environment variables: COLONEL_*
//! 5. CLI flags (command-specific)
//!
//! Scalar keys follow explicit-key semantics: a layer only overrides what it
//! actually sets. `[[command]]` blocks accumulate across layers.
//!
//! # Example Config
//!
//! ```toml
//! namespace = "economy"
//! color = "never"
//!
//! [sender]
//! name = "Steve"
//! kind = "player"
//! permissions = ["eco.use"]
//!
//! [[command]]
//! [command.header]
//! name = "eco"
//! usage = "/eco give <n>"
//! usage_message = "&cUsage: {USAGE}"
//!
//! [[command.method]]
//! name = "give"
//! reply = "&aGave {0} to {SENDER}"
//! [command.method.executor]
//! name = "give"
//! min_arguments = 1
//! max_arguments = 1
//! ```
//!
//! # Module Structure
//!
//! - `types`: configuration and declaration structures
//! - `load`: loading from files and environment, merging, validation
//! - `handler`: turning a `[[command]]` block into a metadata provider

mod handler;
mod load;
mod types;

#[cfg(test)]
mod tests_loading;

pub use handler::ConfigHandler;
pub use load::{global_config_path, load_config, load_partial_toml_file, project_config_path};
pub use types::{
    ColorMode, CommandDecl, Config, MethodDecl, PartialConfig, PartialSenderConfig, SenderConfig,
};
