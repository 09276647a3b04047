//! Configuration types and loading for the tfsgit bridge.
//!
//! The main entry point is [`BridgeConfig`], loaded with [`load_config`].
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. `.tfsgit.yaml` at the root of the working tree
//! 3. `TFSGIT_*` environment variables (e.g. `TFSGIT_GIT_BINARY`)

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tfsgit_core::lines::DEFAULT_REMOTE_NAMESPACE;

/// Name of the per-repository configuration file.
pub const CONFIG_FILE_NAME: &str = ".tfsgit.yaml";

/// Prefix of environment variables that override configuration.
pub const ENV_PREFIX: &str = "TFSGIT_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// A configuration layer could not be parsed or merged.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// Settings for talking to git and locating remotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// The git executable to run.
    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    /// Configuration section holding remote descriptors. Section names are
    /// case-insensitive in git, so this is stored lowercased.
    #[serde(default = "default_remote_namespace")]
    pub remote_namespace: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            git_binary: default_git_binary(),
            remote_namespace: default_remote_namespace(),
        }
    }
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_remote_namespace() -> String {
    DEFAULT_REMOTE_NAMESPACE.to_string()
}

impl BridgeConfig {
    /// Checks values that would otherwise surface as confusing git failures.
    pub fn validate(&self) -> Result<()> {
        if self.git_binary.trim().is_empty() {
            return Err(invalid("git_binary", "must not be empty"));
        }
        let ns = &self.remote_namespace;
        if ns.is_empty() {
            return Err(invalid("remote_namespace", "must not be empty"));
        }
        if ns.contains(|c: char| c == '=' || c == '.' || c.is_whitespace()) {
            return Err(invalid(
                "remote_namespace",
                "must be a single config section name (no '.', '=' or whitespace)",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Path of the configuration file for a working tree.
pub fn config_path(work_tree: &Path) -> PathBuf {
    work_tree.join(CONFIG_FILE_NAME)
}

/// Builds the layered figment for `work_tree` without extracting it.
///
/// An empty or whitespace-only config file is treated as absent.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read.
pub fn figment(work_tree: &Path) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(BridgeConfig::default()));

    let path = config_path(work_tree);
    if path.is_file() && !std::fs::read_to_string(&path)?.trim().is_empty() {
        figment = figment.merge(Yaml::file(&path));
    }

    Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
}

/// Extracts and validates a [`BridgeConfig`] from any figment.
pub fn extract_config(figment: &Figment) -> Result<BridgeConfig> {
    let mut config: BridgeConfig = figment.extract()?;
    // `git config --list` prints section names lowercased.
    config.remote_namespace.make_ascii_lowercase();
    config.validate()?;
    Ok(config)
}

/// Loads configuration for the working tree at `work_tree`.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] or [`ConfigError::Load`] if a layer
/// cannot be read or parsed, and [`ConfigError::InvalidValue`] if the merged
/// values fail validation.
pub fn load_config(work_tree: &Path) -> Result<BridgeConfig> {
    extract_config(&figment(work_tree)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
