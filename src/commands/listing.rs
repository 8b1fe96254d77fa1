//! Directory Listing
//!
//! The `ls`/`dir` builtin. Supports hidden-file and long-format flags,
//! lists directories before files, and renders the long format as a
//! fixed-width table with a symbolic mode string, human-readable size,
//! and local modification time.

use std::fs::Metadata;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::commands::CommandContext;
use crate::error::{Error, Result};
use crate::models::OutputRecord;

/// List a directory's contents
///
/// `-a`/`--all` includes dotfiles, `-l`/`--long` switches to the table
/// format. A non-flag argument selects the directory to list; with
/// several, the last one wins.
pub fn list_directory(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let mut path = ctx.cursor.current().to_path_buf();
    let mut show_hidden = false;
    let mut show_details = false;

    for arg in args {
        match arg.as_str() {
            "-a" | "--all" => show_hidden = true,
            "-l" | "--long" => show_details = true,
            other if !other.starts_with('-') => path = ctx.cursor.resolve(other),
            _ => {}
        }
    }

    let entries = std::fs::read_dir(&path).map_err(|e| Error::from_io_at(e, path.clone()))?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        // Follow symlinks so a link to a directory sorts with the dirs
        let is_dir = std::fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }

    dirs.sort();
    files.sort();

    if dirs.is_empty() && files.is_empty() {
        return Ok(vec![OutputRecord::plain("Directory is empty.")]);
    }

    let records = if show_details {
        render_long_format(&path, &dirs, &files)
    } else {
        render_simple_format(&dirs, &files)
    };

    Ok(records)
}

fn render_simple_format(dirs: &[String], files: &[String]) -> Vec<OutputRecord> {
    let mut records = Vec::with_capacity(dirs.len() + files.len());
    for name in dirs {
        records.push(OutputRecord::info(format!("  {}/", name)));
    }
    for name in files {
        records.push(OutputRecord::plain(format!("  {}", name)));
    }
    records
}

fn render_long_format(path: &Path, dirs: &[String], files: &[String]) -> Vec<OutputRecord> {
    let mut records = Vec::with_capacity(dirs.len() + files.len() + 2);
    records.push(OutputRecord::plain(format!(
        "{:<10} {:<8} {:<20} {:<30}",
        "Mode", "Size", "Modified", "Name"
    )));
    records.push(OutputRecord::plain("-".repeat(70)));

    for name in dirs.iter().chain(files.iter()) {
        let item_path = path.join(name);
        let meta = match std::fs::metadata(&item_path) {
            Ok(meta) => meta,
            Err(err) => {
                records.push(OutputRecord::error(format!("Error listing directory: {}", err)));
                continue;
            }
        };

        let mode = file_mode_string(&meta);
        let size = format_size(meta.len());
        let mtime = meta
            .modified()
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| "-".to_string());
        let display_name = if meta.is_dir() {
            format!("{}/", name)
        } else {
            name.clone()
        };

        records.push(OutputRecord::plain(format!(
            "{:<10} {:<8} {:<20} {:<30}",
            mode, size, mtime, display_name
        )));
    }

    records
}

/// Format a byte count with a 1024 ladder: whole bytes, one decimal above
fn format_size(size: u64) -> String {
    let mut size = size as f64;
    for unit in ['B', 'K', 'M', 'G', 'T'] {
        if size < 1024.0 {
            if unit == 'B' {
                return format!("{}{}", size as u64, unit);
            }
            return format!("{:.1}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1}P", size)
}

/// Symbolic `drwxr-xr-x` style mode string
#[cfg(unix)]
fn file_mode_string(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(if meta.is_dir() { 'd' } else { '-' });
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn file_mode_string(meta: &Metadata) -> String {
    let type_char = if meta.is_dir() { 'd' } else { '-' };
    if meta.permissions().readonly() {
        format!("{}r--r--r--", type_char)
    } else {
        format!("{}rw-rw-rw-", type_char)
    }
}
