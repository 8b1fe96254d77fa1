//! Core data models for MicaShell
//!
//! This module contains the data structures that cross the interpreter
//! boundary: tagged output records handed to the embedding frontend and
//! the placeholder background task entity.

pub mod background_task;
pub mod output_record;

// Re-exports for convenience
pub use background_task::BackgroundTask;
pub use output_record::{OutputRecord, OutputTag};
