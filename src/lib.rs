//! MicaShell - an embeddable interactive command interpreter
//!
//! This library provides the interpreter core behind the `mica`
//! binary: a tokenizer, a set of builtin commands, a synchronous
//! external-command runner, an append-only history ring, and a
//! dispatcher that turns input lines into tagged output records.
//!
//! ## Features
//!
//! - **Builtin Commands:** 23 commands with aliases (ls/dir, rm/del, ...)
//! - **Tagged Output:** Every line carries an error/success/input/info tag
//! - **History Recall:** Append-only per-session history with `!N` recall
//! - **External Fallback:** Unknown commands run as child processes
//! - **Tab Completion:** Builtin-name and path completion for frontends
//! - **Configuration:** TOML/JSON configuration files
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`session`] - The `Session` type and its `dispatch` state machine
//! - [`commands`] - Builtin command registry and handlers
//! - [`tokenizer`] - Quote-aware input tokenization
//! - [`history`] - Append-only history ring and arrow-key cursor
//! - [`cursor`] - Working-directory cursor with lexical normalization
//! - [`external`] - Synchronous external command runner
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### Supporting Modules
//!
//! - [`config`] - Configuration loading, validation, save/load
//! - [`completion`] - Command and path completion logic
//! - [`models`] - Data structures (OutputRecord, BackgroundTask)
//!
//! ## Quick Start
//!
//! ```no_run
//! use micashell::{init, SessionAction};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = init()?;
//!
//! let outcome = session.dispatch("ls -l");
//! for record in &outcome.records {
//!     println!("{}", record.text);
//! }
//! if let Some(SessionAction::Exit { .. }) = outcome.action {
//!     // frontend decides how to wind down
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! Everything is synchronous: `dispatch` blocks until the command (or
//! external child) finishes, and a `Session` expects a single caller.
//! Frontends that need parallel sessions create one `Session` each.
//!
//! ## Safety and Reliability
//!
//! - **No Panics on Input:** Handler and runner faults become error records
//! - **Graceful Degradation:** Falls back to defaults when config loading fails
//! - **Append-Only History:** Entries are never rewritten or dropped mid-session

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod commands;
pub mod completion;
pub mod config;
pub mod cursor;
pub mod error;
pub mod external;
pub mod history;
pub mod models;
pub mod session;
pub mod tokenizer;

// Re-exports for core functionality
pub use config::Config;
pub use error::{Error, Result};
pub use session::{DispatchOutcome, Session, SessionAction};

// Convenience re-exports for common types
pub use commands::{Builtin, CommandContext};
pub use completion::CompletionProvider;
pub use config::loader::ConfigLoader;
pub use cursor::DirectoryCursor;
pub use external::ExternalRunner;
pub use history::{HistoryCursor, HistoryRing};
pub use models::{BackgroundTask, OutputRecord, OutputTag};
pub use tokenizer::tokenize;

// Version information
/// The current version of MicaShell from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize a session with configuration from the default locations
///
/// This is the primary entry point for frontends. It performs the
/// following steps:
/// 1. Checks the environment the shell will run in
/// 2. Loads configuration from the default search paths, falling back
///    to defaults when nothing is found or loading fails
/// 3. Builds a `Session` rooted per the configuration
///
/// # Errors
///
/// Returns an error when the configured startup directory does not
/// exist or session construction fails. A missing or broken config
/// file is not fatal; defaults are used instead.
///
/// # Examples
///
/// ```no_run
/// use micashell::init;
///
/// match init() {
///     Ok(session) => println!("shell ready in {}", session.current_dir().display()),
///     Err(e) => eprintln!("initialization failed: {}", e),
/// }
/// ```
pub fn init() -> Result<Session> {
    info!("🚀 Initializing {} v{}", NAME, VERSION);

    check_environment();

    // Load configuration with fallback
    let config = match ConfigLoader::load() {
        Ok(config) => {
            info!("✅ Configuration loaded");
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    let session = Session::with_config(config)?;
    info!("✅ Session created in {}", session.current_dir().display());

    info!("🎨 {} initialization complete", NAME);
    Ok(session)
}

/// Initialize a session from an explicit configuration file
///
/// Unlike [`init`], a missing or invalid file here is an error: the
/// caller asked for this exact configuration.
pub fn init_with_config(config_path: &std::path::Path) -> Result<Session> {
    info!(
        "🚀 Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    check_environment();

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "Configuration file does not exist".to_string(),
        });
    }

    let config = ConfigLoader::load_from_path(config_path)?;
    info!("✅ Configuration loaded from {}", config_path.display());

    let session = Session::with_config(config)?;
    info!("✅ Session created in {}", session.current_dir().display());

    info!("🎨 {} initialization complete", NAME);
    Ok(session)
}

/// Log anything about the environment that will degrade the session
fn check_environment() {
    debug!("🔍 Checking environment...");

    if std::env::var("HOME").is_err() && std::env::var("USERPROFILE").is_err() {
        warn!("⚠️  No home directory in environment; 'cd' without arguments will fail");
    }
    if std::env::var("PATH").is_err() {
        warn!("⚠️  PATH not set; external commands will not be found");
    }
}

/// Render a startup error with recovery hints for the terminal
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check configuration file syntax\n• Ensure file permissions are correct\n• Run without --config to use defaults",
                path.display(),
                reason
            )
        }
        Error::ConfigParseFailed { format, reason } => {
            format!(
                "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax\n• Ensure file is valid {}\n• Run without --config to use defaults",
                format, reason, format
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}\n\nTry:\n• Check the configuration value\n• Run without --config to use defaults",
                field, reason
            )
        }
        Error::DirectoryNotFound { path } => {
            format!(
                "Startup Error: startup directory '{}' does not exist\n\nTry:\n• Fix shell.startup_directory in the config\n• Create the directory",
                path.display()
            )
        }
        Error::Io(err) => {
            format!(
                "I/O Error: {}\n\nTry:\n• Check file permissions\n• Ensure required directories exist",
                err
            )
        }
        _ => {
            format!(
                "Unexpected Error: {}\n\nPlease report this issue with debug logs enabled (--debug)",
                error
            )
        }
    }
}

/// Get default configuration
///
/// # Examples
///
/// ```
/// use micashell::default_config;
///
/// let config = default_config();
/// assert_eq!(config.shell.prompt, "> ");
/// ```
pub fn default_config() -> Config {
    Config::default()
}
