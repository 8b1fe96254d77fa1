//! Configuration management for MicaShell
//!
//! Provides the session configuration model plus loading and saving in
//! TOML or JSON from a set of well-known locations. Configuration only
//! tunes presentation and process spawning; interpreter invariants
//! (append-only history, synchronous dispatch) are not configurable.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for MicaShell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shell behavior configuration
    pub shell: ShellConfig,

    /// External command configuration
    pub external: ExternalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: ShellConfig::default(),
            external: ExternalConfig::default(),
        }
    }
}

/// Shell behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Directory the session starts in; `None` means the process's
    /// current directory
    pub startup_directory: Option<PathBuf>,

    /// Show the boxed welcome banner when a session starts
    pub show_welcome: bool,

    /// Prompt string frontends should display
    pub prompt: String,

    /// Echo each submitted line back as an input-tagged record
    pub echo_input: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            startup_directory: None,
            show_welcome: true,
            prompt: "> ".to_string(),
            echo_input: true,
        }
    }
}

/// External command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    /// Extra environment variables for spawned commands
    pub environment: HashMap<String, String>,

    /// Whether spawned commands inherit the parent environment
    pub inherit_env: bool,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            environment: HashMap::new(),
            inherit_env: true,
        }
    }
}

/// Configuration utilities
pub mod utils {
    use super::*;

    /// Get configuration file format from path
    pub fn get_config_format(path: &Path) -> Option<loader::ConfigFormat> {
        match path.extension()?.to_str()? {
            "toml" => Some(loader::ConfigFormat::Toml),
            "json" => Some(loader::ConfigFormat::Json),
            _ => None,
        }
    }

    /// Render a default configuration in the given format
    pub fn create_default_config_content(format: loader::ConfigFormat) -> crate::error::Result<String> {
        let config = Config::default();

        match format {
            loader::ConfigFormat::Toml => toml::to_string_pretty(&config).map_err(|e| {
                crate::error::Error::ConfigSerializationFailed {
                    format: "TOML".to_string(),
                    reason: e.to_string(),
                }
            }),
            loader::ConfigFormat::Json => serde_json::to_string_pretty(&config).map_err(|e| {
                crate::error::Error::ConfigSerializationFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                }
            }),
        }
    }
}
