//! External Command Execution
//!
//! Fallback for command names the builtin table does not know. The
//! first token is launched as a program with the remaining tokens as
//! arguments, no shell in between, blocking until the child exits.
//! Stdout and stderr are captured separately and folded into a single
//! output record; launch failures become error records rather than
//! panics or propagated errors.

use std::path::Path;
use std::process::Command;

use crate::config::ExternalConfig;
use crate::error::Error;
use crate::models::OutputRecord;

/// Synchronous runner for non-builtin commands
#[derive(Debug, Clone)]
pub struct ExternalRunner {
    config: ExternalConfig,
}

impl ExternalRunner {
    /// Create a runner with default external-command settings
    pub fn new() -> Self {
        Self {
            config: ExternalConfig::default(),
        }
    }

    /// Create a runner with explicit settings
    pub fn with_config(config: ExternalConfig) -> Self {
        Self { config }
    }

    /// Run a tokenized command in the given working directory
    ///
    /// Exit status zero yields an untagged record of the captured
    /// stdout; any other status yields an error record of the captured
    /// stderr. Trailing newlines are trimmed so records stay
    /// line-oriented.
    pub fn run(&self, tokens: &[String], cwd: &Path) -> OutputRecord {
        let (program, args) = match tokens.split_first() {
            Some(split) => split,
            None => {
                return OutputRecord::error("Error executing command: empty command");
            }
        };

        debug!("Spawning external command '{}' in {}", program, cwd.display());

        let mut command = Command::new(program);
        command.args(args).current_dir(cwd);
        if !self.config.inherit_env {
            command.env_clear();
        }
        command.envs(&self.config.environment);

        match command.output() {
            Ok(output) => {
                let exit_code = output.status.code().unwrap_or(-1);
                debug!("External command '{}' exited with code {}", program, exit_code);

                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    OutputRecord::plain(stdout.trim_end_matches('\n'))
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    OutputRecord::error(format!("Error: {}", stderr.trim_end_matches('\n')))
                }
            }
            Err(err) => {
                warn!("Failed to launch external command '{}': {}", program, err);
                let failure = Error::ExternalProcessFailure {
                    command: program.clone(),
                    reason: err.to_string(),
                };
                OutputRecord::error(failure.to_string())
            }
        }
    }
}

impl Default for ExternalRunner {
    fn default() -> Self {
        Self::new()
    }
}
