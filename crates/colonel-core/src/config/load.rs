//! Configuration loading from files and environment

use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{ColorMode, Config, PartialConfig};
use crate::{metadata::SenderKind, Error, Result};

const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576; // 1 MB

const PROJECT_CONFIG_FILE: &str = "colonel.toml";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy.
///
/// `explicit` replaces the project file and, unlike it, must exist.
///
/// # Errors
///
/// Returns error if:
/// - A config file is malformed TOML or has unknown keys
/// - The explicit config file cannot be read
/// - Config values fail validation
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    // 1. Start with built-in defaults
    let mut config = Config::default();

    // 2. Global config, skipped when absent
    if let Ok(global_path) = global_config_path() {
        merge_if_present(&mut config, &global_path)?;
    }

    // 3. Project config or the explicit file
    match explicit {
        Some(path) => config.merge_partial(load_partial_toml_file(path)?),
        None => {
            if let Ok(project_path) = project_config_path() {
                merge_if_present(&mut config, &project_path)?;
            }
        }
    }

    // 4. Environment variable overrides
    config.apply_env_vars()?;

    config.validate()?;
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
///
/// # Errors
///
/// Returns error if no home directory can be determined
pub fn global_config_path() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "colonel")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
        .ok_or_else(|| Error::IoError("Failed to determine global config directory".to_string()))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .map_err(|e| Error::IoError(format!("Failed to get current directory: {e}")))
}

/// Load a TOML file into a [`PartialConfig`].
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read or is not a regular file
/// - File exceeds 1 MB
/// - TOML is malformed or contains unknown keys
pub fn load_partial_toml_file(path: &Path) -> Result<PartialConfig> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        Error::IoError(format!(
            "Failed to read config file metadata {}: {e}",
            path.display()
        ))
    })?;

    if metadata.is_dir() {
        return Err(Error::IoError(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(Error::InvalidConfig(format!(
            "Config file {} exceeds maximum size of {MAX_CONFIG_FILE_SIZE} bytes",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    debug!(path = %path.display(), "Loading config file");
    toml::from_str(&content).map_err(|e| {
        Error::ParseError(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

fn merge_if_present(config: &mut Config, path: &Path) -> Result<()> {
    // try-load: a missing file is not an error
    match load_partial_toml_file(path) {
        Ok(partial) => {
            config.merge_partial(partial);
            Ok(())
        }
        Err(Error::IoError(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Parse a TOML document on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or values fail validation
    pub fn from_toml(content: &str) -> Result<Self> {
        let partial: PartialConfig = toml::from_str(content)?;
        let mut config = Self::default();
        config.merge_partial(partial);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns error if environment variable values are invalid
    pub fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("COLONEL_NAMESPACE") {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "COLONEL_NAMESPACE cannot be empty - unset the variable or provide a namespace"
                        .to_string(),
                ));
            }
            self.namespace = value;
        }

        if let Ok(value) = std::env::var("COLONEL_COLOR") {
            self.color = value.parse::<ColorMode>().map_err(|e| {
                Error::InvalidConfig(format!("Invalid COLONEL_COLOR value: {e}"))
            })?;
        }

        if let Ok(value) = std::env::var("COLONEL_SENDER_NAME") {
            self.sender.name = value;
        }

        if let Ok(value) = std::env::var("COLONEL_SENDER_KIND") {
            self.sender.kind = SenderKind::parse(&value).map_err(|e| {
                Error::InvalidConfig(format!("Invalid COLONEL_SENDER_KIND value: {e}"))
            })?;
        }

        Ok(())
    }
}
