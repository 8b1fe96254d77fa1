//! Output Record Model
//!
//! Represents a single unit of interpreter output together with a
//! presentation tag. Records are produced by the dispatcher and the
//! command handlers; how a tag is rendered (color, style) is entirely
//! the embedding frontend's decision.

use serde::{Deserialize, Serialize};

/// Presentation category attached to an output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTag {
    /// Ordinary output with no particular styling
    None,
    /// A failure the user should notice
    Error,
    /// Confirmation that a state change happened
    Success,
    /// An echo of the line the user submitted
    Input,
    /// Informational output (banners, notices, directory markers)
    Info,
}

impl Default for OutputTag {
    fn default() -> Self {
        OutputTag::None
    }
}

/// A single unit of interpreter output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// The text content (may contain embedded newlines)
    pub text: String,

    /// Presentation tag for the frontend
    pub tag: OutputTag,
}

impl OutputRecord {
    /// Create a record with an explicit tag
    pub fn new(text: impl Into<String>, tag: OutputTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    /// Create an untagged record
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, OutputTag::None)
    }

    /// Create an error-tagged record
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, OutputTag::Error)
    }

    /// Create a success-tagged record
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, OutputTag::Success)
    }

    /// Create an input-echo record
    pub fn input(text: impl Into<String>) -> Self {
        Self::new(text, OutputTag::Input)
    }

    /// Create an info-tagged record
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, OutputTag::Info)
    }

    /// Check whether this record carries the error tag
    pub fn is_error(&self) -> bool {
        self.tag == OutputTag::Error
    }
}

impl Default for OutputRecord {
    fn default() -> Self {
        Self::plain(String::new())
    }
}

impl From<String> for OutputRecord {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for OutputRecord {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}
