//! Configuration File Loading
//!
//! Handles loading and saving configuration files from various locations
//! with support for multiple formats and fallback mechanisms.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
    /// Current configuration file path (if loaded)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::load_with_options(LoadOptions::default())
    }

    /// Load configuration with custom options
    pub fn load_with_options(options: LoadOptions) -> Result<Config> {
        let mut loader = Self::new();

        // Try to find and load existing configuration
        if let Some((path, config)) = loader.find_and_load_config()? {
            info!("Loaded configuration from {}", path.display());
            loader.current_path = Some(path);

            if options.validate {
                loader.validate_config(&config)?;
            }

            return Ok(config);
        }

        // No configuration found, fall back to defaults if requested
        if options.create_default {
            debug!("No configuration file found, using defaults");
            let config = Config::default();
            if options.validate {
                loader.validate_config(&config)?;
            }
            Ok(config)
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load configuration from an explicit path
    ///
    /// The format is taken from the file extension; anything other than
    /// `.json` is parsed as TOML.
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let loader = Self::new();
        let format = super::utils::get_config_format(path).unwrap_or(ConfigFormat::Toml);

        let config = loader.load_config_file(path, format).map_err(|e| match e {
            Error::Io(io) => Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: io.to_string(),
            },
            other => other,
        })?;

        loader.validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to the current path or default location
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::get_default_config_path);

        self.save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Determine format from file extension, defaulting to TOML
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                }
            })?,
            _ => toml::to_string_pretty(config).map_err(|e| Error::ConfigSerializationFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            })?,
        };

        fs::write(path, content).map_err(|e| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = self.get_config_path_for_format(path, *format);

                if config_path.exists() {
                    match self.load_config_file(&config_path, *format) {
                        Ok(config) => return Ok(Some((config_path, config))),
                        Err(e) => {
                            warn!("Failed to load config from {}: {}", config_path.display(), e);
                            continue;
                        }
                    }
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Get configuration file path for a specific format
    fn get_config_path_for_format(&self, base_path: &Path, format: ConfigFormat) -> PathBuf {
        let extension = match format {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        };

        base_path.with_extension(extension)
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("micashell"));
            paths.push(config_dir.join("micashell").join("config"));
        }

        // XDG config home fallback (for platforms that might set it)
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("micashell"));
        }

        // Home directory fallbacks
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".micashell"));
            paths.push(home.join(".config").join("micashell"));
        }

        // Current working directory
        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".micashell"));
        }

        paths
    }

    /// Get the default configuration path
    fn get_default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("micashell")
            .join("config.toml")
    }

    /// Validate configuration
    fn validate_config(&self, config: &Config) -> Result<()> {
        // Shell validation
        if config.shell.prompt.is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "shell.prompt".to_string(),
                reason: "Prompt cannot be empty".to_string(),
            });
        }

        if let Some(dir) = &config.shell.startup_directory {
            if dir.as_os_str().is_empty() {
                return Err(Error::ConfigValidationFailed {
                    field: "shell.startup_directory".to_string(),
                    reason: "Startup directory cannot be empty".to_string(),
                });
            }
        }

        // External command validation
        for (key, value) in &config.external.environment {
            if key.is_empty() {
                return Err(Error::ConfigValidationFailed {
                    field: "external.environment".to_string(),
                    reason: "Environment variable names cannot be empty".to_string(),
                });
            }
            if key.contains('=') || key.contains('\0') {
                return Err(Error::ConfigValidationFailed {
                    field: "external.environment".to_string(),
                    reason: format!("Invalid environment variable name: '{}'", key),
                });
            }
            if value.contains('\0') {
                return Err(Error::ConfigValidationFailed {
                    field: "external.environment".to_string(),
                    reason: format!("Invalid value for environment variable '{}'", key),
                });
            }
        }

        Ok(())
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Add a custom search path
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
