//! Interactive Session
//!
//! One `Session` owns everything a shell conversation needs: the
//! directory cursor, the history ring, the background-task list, and
//! the configuration. `dispatch` takes a raw input line and returns
//! the records to render plus an optional action (clear the log,
//! recall a history entry into the input, or exit) that only the
//! embedding frontend can carry out.

use std::path::Path;

use chrono::Local;
use uuid::Uuid;

use crate::commands::{self, Builtin, CommandContext};
use crate::config::Config;
use crate::cursor::DirectoryCursor;
use crate::error::{Error, Result};
use crate::external::ExternalRunner;
use crate::history::HistoryRing;
use crate::models::{BackgroundTask, OutputRecord};
use crate::tokenizer::tokenize;

/// Everything `dispatch` produced for one input line
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Records to append to the rendered log, in order
    pub records: Vec<OutputRecord>,
    /// Side effect the frontend must perform, if any
    pub action: Option<SessionAction>,
}

/// Frontend obligations that cannot be expressed as output records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Empty the rendered log
    ClearLog,
    /// Replace the current input line with this text, without running it
    Recall(String),
    /// End the session; confirm first when background tasks exist
    Exit { needs_confirmation: bool },
}

/// A single interactive shell session
pub struct Session {
    /// Unique id, for log correlation when several sessions share a process
    id: Uuid,
    cursor: DirectoryCursor,
    history: HistoryRing,
    background_tasks: Vec<BackgroundTask>,
    config: Config,
    runner: ExternalRunner,
}

impl Session {
    /// Create a session with default configuration, rooted at the
    /// process working directory
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a session from a configuration
    ///
    /// `shell.startup_directory` overrides the process working
    /// directory when set; it must name an existing directory.
    pub fn with_config(config: Config) -> Result<Self> {
        let cursor = match &config.shell.startup_directory {
            Some(dir) => DirectoryCursor::new(dir)?,
            None => DirectoryCursor::from_current_dir()?,
        };

        let runner = ExternalRunner::with_config(config.external.clone());
        let id = Uuid::new_v4();
        info!("Session {} starting in {}", id, cursor.current().display());

        Ok(Self {
            id,
            cursor,
            history: HistoryRing::new(),
            background_tasks: Vec::new(),
            config,
            runner,
        })
    }

    /// Session id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The working directory the next command will run in
    pub fn current_dir(&self) -> &Path {
        self.cursor.current()
    }

    /// The session's command history
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// The configuration this session was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Background tasks started in this session
    pub fn background_tasks(&self) -> &[BackgroundTask] {
        &self.background_tasks
    }

    /// Register work the embedding frontend runs on this session's behalf
    ///
    /// While any task is registered, `exit` asks for confirmation
    /// instead of closing immediately.
    pub fn register_background_task(&mut self, task: BackgroundTask) {
        debug!("Session {} registered background task {}", self.id, task.id);
        self.background_tasks.push(task);
    }

    /// Process one input line
    ///
    /// Blank lines are ignored entirely. Everything else lands in
    /// history first, so failing commands can be recalled and fixed.
    /// Handler and runner faults become error records; this function
    /// never panics on user input.
    pub fn dispatch(&mut self, line: &str) -> DispatchOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return DispatchOutcome::default();
        }

        let index = self.history.append(trimmed);
        debug!("Dispatching entry {}: {}", index, trimmed);

        let mut records = Vec::new();
        if self.config.shell.echo_input {
            records.push(OutputRecord::input(format!("> {}", trimmed)));
        }

        let tokens = tokenize(trimmed);
        let head = match tokens.first() {
            Some(head) => head.to_lowercase(),
            // Quotes can collapse to nothing ("" alone); echo and move on
            None => return DispatchOutcome { records, action: None },
        };

        if let Some(suffix) = head.strip_prefix('!') {
            return self.recall(suffix, records);
        }

        match Builtin::lookup(&head) {
            Some(builtin) => {
                let mut ctx = CommandContext {
                    cursor: &mut self.cursor,
                    history: &self.history,
                    config: &self.config,
                };
                match commands::run(builtin, &tokens[1..], &mut ctx) {
                    Ok(mut output) => records.append(&mut output),
                    Err(err) => {
                        warn!("Builtin '{}' failed: {}", head, err);
                        records.push(OutputRecord::error(err.to_string()));
                    }
                }

                let action = match builtin {
                    Builtin::Clear => Some(SessionAction::ClearLog),
                    Builtin::Exit => Some(SessionAction::Exit {
                        needs_confirmation: !self.background_tasks.is_empty(),
                    }),
                    _ => None,
                };
                DispatchOutcome { records, action }
            }
            None => {
                debug!("No builtin named '{}', trying external command", head);
                records.push(self.runner.run(&tokens, self.cursor.current()));
                DispatchOutcome { records, action: None }
            }
        }
    }

    /// Handle a `!`-prefixed head token
    ///
    /// `!<digits>` asks the frontend to put that history entry back in
    /// the input line. A bare `!` does nothing; anything else is an
    /// invalid index.
    fn recall(&self, suffix: &str, mut records: Vec<OutputRecord>) -> DispatchOutcome {
        if suffix.is_empty() {
            return DispatchOutcome { records, action: None };
        }

        let entry = suffix
            .parse::<usize>()
            .ok()
            .and_then(|index| self.history.get(index));

        match entry {
            Some(entry) => {
                debug!("Recalling history entry {}", entry.index);
                DispatchOutcome {
                    records,
                    action: Some(SessionAction::Recall(entry.text.clone())),
                }
            }
            None => {
                records.push(OutputRecord::error(
                    Error::InvalidHistoryIndex {
                        input: suffix.to_string(),
                    }
                    .to_string(),
                ));
                DispatchOutcome { records, action: None }
            }
        }
    }

    /// The boxed greeting shown when a session opens
    pub fn welcome_banner(&self) -> OutputRecord {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        let time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());
        let system = format!("{} {}", std::env::consts::OS, std::env::consts::ARCH);

        let text = format!(
            "╔══════════════════════════════════════════════════════════════╗\n\
             ║{:^62}║\n\
             ╠══════════════════════════════════════════════════════════════╣\n\
             ║  User    : {:<50}║\n\
             ║  Time    : {:<50}║\n\
             ║  Host    : {:<50}║\n\
             ║  System  : {:<50}║\n\
             ╠══════════════════════════════════════════════════════════════╣\n\
             ║  Welcome to mica - a small interactive shell                 ║\n\
             ║  Type 'help' to see available commands                       ║\n\
             ╚══════════════════════════════════════════════════════════════╝",
            "MICA SHELL", user, time, host, system
        );

        OutputRecord::info(text)
    }
}
