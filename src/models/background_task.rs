//! Background Task Model
//!
//! Placeholder entity for deferred job control. The interpreter never
//! spawns these; the session only tracks whether any exist so that exit
//! can ask for confirmation. Real backgrounding is out of scope.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A command the user asked to run in the background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundTask {
    /// Unique identifier for this task
    pub id: Uuid,

    /// The command line as the user entered it
    pub command: String,

    /// When the task was registered
    pub started_at: DateTime<Local>,
}

impl BackgroundTask {
    /// Create a new background task record
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: command.into(),
            started_at: Local::now(),
        }
    }
}
