//! Error types and Result aliases for MicaShell

use std::fmt;
use std::path::PathBuf;

/// Result type alias for MicaShell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for MicaShell
#[derive(Debug)]
pub enum Error {
    // === Command errors ===
    /// Command arguments are missing or malformed
    InvalidArgument {
        message: String,
    },

    /// Path does not exist
    NotFound {
        path: PathBuf,
    },

    /// Directory does not exist (navigation target)
    DirectoryNotFound {
        path: PathBuf,
    },

    /// Path exists but is not a directory
    NotADirectory {
        path: PathBuf,
    },

    /// Path exists but is not a regular file
    NotAFile {
        path: PathBuf,
    },

    /// Access to a path was denied
    PermissionDenied {
        path: PathBuf,
    },

    /// Destination already exists
    TargetConflict {
        path: PathBuf,
    },

    /// History recall index is malformed or out of range
    InvalidHistoryIndex {
        input: String,
    },

    /// External process could not be launched
    ExternalProcessFailure {
        command: String,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to save configuration file
    ConfigSaveFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    /// Zip archive errors
    Zip(zip::result::ZipError),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Command errors
            Error::InvalidArgument { message } => {
                write!(f, "{}", message)
            }
            Error::NotFound { path } => {
                write!(f, "No such file or directory: {}", path.display())
            }
            Error::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            Error::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            Error::NotAFile { path } => {
                write!(f, "Not a file: {}", path.display())
            }
            Error::PermissionDenied { path } => {
                write!(f, "Permission denied: {}", path.display())
            }
            Error::TargetConflict { path } => {
                write!(f, "Already exists: {}", path.display())
            }
            Error::InvalidHistoryIndex { input } => {
                write!(f, "Invalid history index: {}", input)
            }
            Error::ExternalProcessFailure { command: _, reason } => {
                write!(f, "Error executing command: {}", reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigSaveFailed { path, reason } => {
                write!(f, "Failed to save config to '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Invalid pattern: {}", err),
            Error::Zip(err) => write!(f, "Archive error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}

impl Error {
    /// Map an I/O error to a path-aware command error where the kind allows
    pub fn from_io_at(err: std::io::Error, path: PathBuf) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
            std::io::ErrorKind::AlreadyExists => Error::TargetConflict { path },
            _ => Error::Io(err),
        }
    }
}
