//! Directory Cursor
//!
//! Tracks the interpreter's working directory as plain state instead of
//! mutating the process-wide current directory. Every relative path a
//! command receives is resolved against this cursor, so multiple
//! sessions can coexist in one process without interfering.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// The interpreter's current working directory
#[derive(Debug, Clone)]
pub struct DirectoryCursor {
    current: PathBuf,
}

impl DirectoryCursor {
    /// Create a cursor at the given directory
    ///
    /// # Errors
    ///
    /// Returns an error when the path does not exist or is not a
    /// directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = normalize(&path.into());
        validate_directory(&path)?;
        Ok(Self { current: path })
    }

    /// Create a cursor at the process's current directory
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self {
            current: std::env::current_dir()?,
        })
    }

    /// The directory the cursor points at
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Resolve a path argument against the cursor
    ///
    /// Relative paths are joined onto the current directory; absolute
    /// paths stand alone. `.` and `..` components are removed lexically
    /// without touching the filesystem, so symlinks are not expanded
    /// and `..` never escapes the root.
    pub fn resolve(&self, target: impl AsRef<Path>) -> PathBuf {
        normalize(&self.current.join(target))
    }

    /// Move the cursor to a new directory
    ///
    /// The target is resolved and validated first; on failure the
    /// cursor keeps its previous position. Returns the new directory.
    pub fn change_to(&mut self, target: impl AsRef<Path>) -> Result<PathBuf> {
        let resolved = self.resolve(target);
        validate_directory(&resolved)?;
        self.current = resolved.clone();
        debug!("Directory cursor moved to {}", resolved.display());
        Ok(resolved)
    }
}

/// Check that a path names an existing directory
fn validate_directory(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(err) => match err.kind() {
            std::io::ErrorKind::NotFound => Err(Error::DirectoryNotFound {
                path: path.to_path_buf(),
            }),
            std::io::ErrorKind::PermissionDenied => Err(Error::PermissionDenied {
                path: path.to_path_buf(),
            }),
            _ => Err(Error::Io(err)),
        },
    }
}

/// Remove `.` and `..` components lexically
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            // Popping at the root is a no-op, so `..` cannot escape it
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
