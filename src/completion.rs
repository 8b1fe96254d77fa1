//! Command and Path Completion
//!
//! Prefix completion for interactive frontends: builtin names while
//! the first word is being typed, directory entries for every word
//! after it. The provider never touches PATH; only builtins and the
//! filesystem under the caller's working directory are suggested.

use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::Builtin;

/// Completion provider over builtin names and filesystem paths
#[derive(Debug, Clone, Default)]
pub struct CompletionProvider;

/// Completion result containing suggestions
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// List of completion suggestions
    pub suggestions: Vec<CompletionItem>,
    /// The prefix that was matched
    pub prefix: String,
    /// Type of completion
    pub completion_type: CompletionType,
}

/// Individual completion item
#[derive(Debug, Clone)]
pub struct CompletionItem {
    /// The completion text
    pub text: String,
    /// Display label (directories carry the trailing slash)
    pub label: String,
    /// Type of completion item
    pub item_type: CompletionItemType,
}

/// Type of completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionType {
    /// Builtin command completion
    Command,
    /// File/directory path completion
    Path,
}

/// Type of completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionItemType {
    /// Builtin command
    Command,
    /// Directory
    Directory,
    /// File
    File,
}

impl CompletionProvider {
    /// Create a new completion provider
    pub fn new() -> Self {
        Self
    }

    /// Get completions for the given input
    pub fn get_completions(&self, input: &str, working_dir: &Path) -> CompletionResult {
        let trimmed = input.trim_start();
        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        if parts.is_empty() {
            // Nothing typed yet: offer every builtin
            return self.complete_command("");
        }

        if parts.len() == 1 && !trimmed.ends_with(char::is_whitespace) {
            // Still typing the command itself
            self.complete_command(parts[0])
        } else {
            // Completing an argument; an input ending in whitespace
            // starts a fresh word
            let last_arg = if trimmed.ends_with(char::is_whitespace) {
                ""
            } else {
                parts.last().copied().unwrap_or("")
            };
            self.complete_path(last_arg, working_dir)
        }
    }

    /// Complete a builtin command name
    fn complete_command(&self, prefix: &str) -> CompletionResult {
        let lower = prefix.to_lowercase();
        let suggestions: Vec<CompletionItem> = Builtin::names()
            .iter()
            .filter(|name| name.starts_with(&lower))
            .map(|name| CompletionItem {
                text: (*name).to_string(),
                label: (*name).to_string(),
                item_type: CompletionItemType::Command,
            })
            .collect();

        CompletionResult {
            suggestions,
            prefix: prefix.to_string(),
            completion_type: CompletionType::Command,
        }
    }

    /// Complete a file or directory path
    fn complete_path(&self, prefix: &str, working_dir: &Path) -> CompletionResult {
        let (dir_path, file_prefix) = self.parse_path_prefix(prefix, working_dir);

        let mut suggestions = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_path) {
            for entry in entries.flatten() {
                let filename = match entry.file_name().into_string() {
                    Ok(name) => name,
                    Err(_) => continue,
                };

                // Hidden entries only when asked for explicitly
                if filename.starts_with('.') && !file_prefix.starts_with('.') {
                    continue;
                }
                if !filename.starts_with(&file_prefix) {
                    continue;
                }

                let is_dir = entry
                    .metadata()
                    .map(|meta| meta.is_dir())
                    .unwrap_or(false);
                let item_type = if is_dir {
                    CompletionItemType::Directory
                } else {
                    CompletionItemType::File
                };
                let label = if is_dir {
                    format!("{}/", filename)
                } else {
                    filename.clone()
                };

                suggestions.push(CompletionItem {
                    text: filename,
                    label,
                    item_type,
                });
            }
        }

        // Directories first, then files, alphabetically within each group
        suggestions.sort_by(|a, b| match (a.item_type, b.item_type) {
            (CompletionItemType::Directory, CompletionItemType::File) => std::cmp::Ordering::Less,
            (CompletionItemType::File, CompletionItemType::Directory) => {
                std::cmp::Ordering::Greater
            }
            _ => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
        });
        suggestions.truncate(50);

        CompletionResult {
            suggestions,
            prefix: file_prefix,
            completion_type: CompletionType::Path,
        }
    }

    /// Split a typed path into the directory to list and the name prefix
    fn parse_path_prefix(&self, prefix: &str, working_dir: &Path) -> (PathBuf, String) {
        if prefix.is_empty() {
            return (working_dir.to_path_buf(), String::new());
        }

        let path = Path::new(prefix);
        let expanded = if path.is_absolute() {
            path.to_path_buf()
        } else {
            working_dir.join(path)
        };

        if prefix.ends_with('/') || prefix.ends_with(std::path::MAIN_SEPARATOR) {
            (expanded, String::new())
        } else {
            match expanded.parent() {
                Some(parent) => {
                    let filename = expanded
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("")
                        .to_string();
                    (parent.to_path_buf(), filename)
                }
                None => (expanded, String::new()),
            }
        }
    }

    /// Directory-only completion for commands that take directories
    pub fn get_argument_completions(
        &self,
        command: &str,
        arg: &str,
        working_dir: &Path,
    ) -> CompletionResult {
        let mut result = self.complete_path(arg, working_dir);
        if command == "cd" {
            result
                .suggestions
                .retain(|item| item.item_type == CompletionItemType::Directory);
        }
        result
    }
}

impl CompletionResult {
    /// Check if there are any suggestions
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Get the number of suggestions
    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// Get the common prefix of all suggestions (for automatic completion)
    pub fn get_common_prefix(&self) -> Option<String> {
        if self.suggestions.is_empty() {
            return None;
        }
        if self.suggestions.len() == 1 {
            return Some(self.suggestions[0].text.clone());
        }

        let first = &self.suggestions[0].text;
        let mut common = String::new();
        for (i, ch) in first.chars().enumerate() {
            if self
                .suggestions
                .iter()
                .all(|s| s.text.chars().nth(i) == Some(ch))
            {
                common.push(ch);
            } else {
                break;
            }
        }

        if common.len() > self.prefix.len() {
            Some(common)
        } else {
            None
        }
    }
}
