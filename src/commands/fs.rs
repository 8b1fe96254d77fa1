//! Filesystem Commands
//!
//! Handlers that create, remove, copy, move, and re-permission files
//! and directories. Multi-target commands work through their targets
//! independently: one failing target produces an error record and the
//! rest are still attempted.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::commands::CommandContext;
use crate::error::{Error, Result};
use crate::models::OutputRecord;

/// Change the working directory; with no argument, go home
pub fn change_directory(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let target = match args.first() {
        Some(arg) => PathBuf::from(arg),
        None => dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not determine home directory".to_string()))?,
    };

    let new_path = ctx.cursor.change_to(&target)?;
    Ok(vec![OutputRecord::success(format!(
        "Changed to: {}",
        new_path.display()
    ))])
}

/// Create directories, parents included, one record per argument
pub fn make_directory(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if args.is_empty() {
        return Err(Error::InvalidArgument {
            message: "mkdir requires a directory name".to_string(),
        });
    }

    let mut records = Vec::with_capacity(args.len());
    for arg in args {
        let path = ctx.cursor.resolve(arg);
        match std::fs::create_dir_all(&path) {
            Ok(()) => records.push(OutputRecord::success(format!(
                "Directory created: {}",
                path.display()
            ))),
            Err(err) => records.push(OutputRecord::error(Error::from_io_at(err, path).to_string())),
        }
    }

    Ok(records)
}

/// Create empty files, or refresh the modification time of existing ones
pub fn create_file(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if args.is_empty() {
        return Err(Error::InvalidArgument {
            message: "touch requires a file name".to_string(),
        });
    }

    let mut records = Vec::with_capacity(args.len());
    for arg in args {
        let path = ctx.cursor.resolve(arg);
        match touch_path(&path) {
            Ok(()) => records.push(OutputRecord::success(format!(
                "File created: {}",
                path.display()
            ))),
            Err(err) => records.push(OutputRecord::error(Error::from_io_at(err, path).to_string())),
        }
    }

    Ok(records)
}

fn touch_path(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.set_modified(SystemTime::now())
}

/// Remove files and directories
///
/// Directories need `-r` (or `-rf`/`-fr`); `-f` silences missing-target
/// errors. Every leading-dash token is treated as a flag, never as a
/// target.
pub fn remove(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let force = args.iter().any(|a| a == "-f");
    let recursive = args.iter().any(|a| a == "-r" || a == "-rf" || a == "-fr");
    let targets: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    if targets.is_empty() {
        return Err(Error::InvalidArgument {
            message: "rm requires a file or directory name".to_string(),
        });
    }

    let mut records = Vec::new();
    for target in targets {
        let path = ctx.cursor.resolve(target);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => {
                if recursive {
                    match std::fs::remove_dir_all(&path) {
                        Ok(()) => records.push(OutputRecord::success(format!(
                            "Directory removed: {}",
                            path.display()
                        ))),
                        Err(err) => records
                            .push(OutputRecord::error(Error::from_io_at(err, path).to_string())),
                    }
                } else {
                    records.push(OutputRecord::error(format!(
                        "Cannot remove directory {} without -r option",
                        path.display()
                    )));
                }
            }
            Ok(_) => match std::fs::remove_file(&path) {
                Ok(()) => records.push(OutputRecord::success(format!(
                    "File removed: {}",
                    path.display()
                ))),
                Err(err) => {
                    records.push(OutputRecord::error(Error::from_io_at(err, path).to_string()))
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if !force {
                    records.push(OutputRecord::error(
                        Error::NotFound { path }.to_string(),
                    ));
                }
            }
            Err(err) => {
                records.push(OutputRecord::error(Error::from_io_at(err, path).to_string()))
            }
        }
    }

    Ok(records)
}

/// Copy files, and with `-r` whole directories
pub fn copy(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let recursive = args.iter().any(|a| a == "-r");
    let real_args: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    if real_args.len() < 2 {
        return Err(Error::InvalidArgument {
            message: "cp requires source and destination".to_string(),
        });
    }

    let destination = ctx.cursor.resolve(real_args[real_args.len() - 1]);
    let sources = &real_args[..real_args.len() - 1];

    let mut records = Vec::new();
    for source in sources {
        let source_path = ctx.cursor.resolve(source);
        let source_is_dir = std::fs::metadata(&source_path)
            .map(|m| m.is_dir())
            .unwrap_or(false);

        if source_is_dir {
            if !recursive {
                records.push(OutputRecord::error(format!(
                    "Cannot copy directory {} without -r option",
                    source_path.display()
                )));
                continue;
            }

            let base = match source_path.file_name() {
                Some(base) => base.to_os_string(),
                None => {
                    records.push(OutputRecord::error(
                        Error::InvalidArgument {
                            message: format!("Cannot copy {}", source_path.display()),
                        }
                        .to_string(),
                    ));
                    continue;
                }
            };
            let dest_dir = destination.join(base);

            if dest_dir.exists() {
                records.push(OutputRecord::error(
                    Error::TargetConflict { path: dest_dir }.to_string(),
                ));
                continue;
            }

            match copy_dir_recursive(&source_path, &dest_dir) {
                Ok(()) => records.push(OutputRecord::success(format!(
                    "Directory copied: {} -> {}",
                    source_path.display(),
                    dest_dir.display()
                ))),
                Err(err) => records.push(OutputRecord::error(
                    Error::from_io_at(err, source_path).to_string(),
                )),
            }
        } else {
            let dest_file = if destination.is_dir() {
                match source_path.file_name() {
                    Some(base) => destination.join(base),
                    None => destination.clone(),
                }
            } else {
                destination.clone()
            };

            match std::fs::copy(&source_path, &dest_file) {
                Ok(_) => records.push(OutputRecord::success(format!(
                    "File copied: {} -> {}",
                    source_path.display(),
                    dest_file.display()
                ))),
                Err(err) => records.push(OutputRecord::error(
                    Error::from_io_at(err, source_path).to_string(),
                )),
            }
        }
    }

    Ok(records)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Move files and directories
///
/// Rename first; when that fails (typically across filesystems), fall
/// back to copy-and-delete. A directory destination receives the
/// source under its own name.
pub fn move_entries(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if args.len() < 2 {
        return Err(Error::InvalidArgument {
            message: "mv requires source and destination".to_string(),
        });
    }

    let destination = ctx.cursor.resolve(&args[args.len() - 1]);
    let sources = &args[..args.len() - 1];

    let mut records = Vec::new();
    for source in sources {
        let source_path = ctx.cursor.resolve(source);
        let dest_path = if destination.is_dir() {
            match source_path.file_name() {
                Some(base) => destination.join(base),
                None => destination.clone(),
            }
        } else {
            destination.clone()
        };

        match move_path(&source_path, &dest_path) {
            Ok(()) => records.push(OutputRecord::success(format!(
                "Moved: {} -> {}",
                source_path.display(),
                dest_path.display()
            ))),
            Err(err) => records.push(OutputRecord::error(
                Error::from_io_at(err, source_path.clone()).to_string(),
            )),
        }
    }

    Ok(records)
}

fn move_path(src: &Path, dst: &Path) -> std::io::Result<()> {
    match std::fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(err),
        Err(_) => {
            // Rename refused (commonly a cross-filesystem move): copy, then delete
            let meta = std::fs::metadata(src)?;
            if meta.is_dir() {
                copy_dir_recursive(src, dst)?;
                std::fs::remove_dir_all(src)
            } else {
                std::fs::copy(src, dst)?;
                std::fs::remove_file(src)
            }
        }
    }
}

/// Change permission bits from an octal mode string
pub fn change_mode(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if args.len() < 2 {
        return Err(Error::InvalidArgument {
            message: "chmod requires mode and file name".to_string(),
        });
    }

    let mode_arg = &args[0];
    let path = ctx.cursor.resolve(&args[1]);

    let mode = u32::from_str_radix(mode_arg, 8).map_err(|_| Error::InvalidArgument {
        message: format!("Error changing permissions: invalid octal mode '{}'", mode_arg),
    })?;

    apply_mode(&path, mode)?;
    Ok(vec![OutputRecord::success(format!(
        "Permissions changed for {}",
        path.display()
    ))])
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|err| Error::from_io_at(err, path.to_path_buf()))
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> Result<()> {
    Err(Error::InvalidArgument {
        message: "chmod is not supported on this platform".to_string(),
    })
}
