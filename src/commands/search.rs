//! Search Commands
//!
//! Name search (`find`) and in-file line search (`grep`). Name
//! matching is case-insensitive and always recursive; line matching
//! is case-sensitive. Both take the pattern as a regular expression.

use regex::{Regex, RegexBuilder};
use walkdir::WalkDir;

use crate::commands::CommandContext;
use crate::error::{Error, Result};
use crate::models::OutputRecord;

/// Search file and directory names below the working directory
///
/// A second argument naming an existing subdirectory narrows the
/// search root; anything else is ignored. Matches are reported
/// relative to that root with a `./` prefix. Unreadable directories
/// are skipped rather than aborting the walk.
pub fn find(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let pattern = match args.first() {
        Some(pattern) => pattern,
        None => {
            return Err(Error::InvalidArgument {
                message: "find requires a search pattern".to_string(),
            })
        }
    };

    let mut search_dir = ctx.cursor.current().to_path_buf();
    if let Some(arg) = args.get(1) {
        let candidate = ctx.cursor.resolve(arg);
        if candidate.is_dir() {
            search_dir = candidate;
        }
    }

    let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;

    let mut records = vec![OutputRecord::plain(format!(
        "Searching for '{}' in {}...",
        pattern,
        search_dir.display()
    ))];

    let mut found = Vec::new();
    for entry in WalkDir::new(&search_dir).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let name = entry.file_name().to_string_lossy();
        if regex.is_match(&name) {
            let rel = entry.path().strip_prefix(&search_dir).unwrap_or(entry.path());
            found.push(format!("./{}", rel.display()));
        }
    }

    if found.is_empty() {
        records.push(OutputRecord::plain("No items found."));
    } else {
        records.push(OutputRecord::plain("Found items:"));
        records.extend(found.into_iter().map(OutputRecord::plain));
    }

    Ok(records)
}

/// Print the lines of a file that match a pattern
pub fn grep(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if args.len() < 2 {
        return Err(Error::InvalidArgument {
            message: "grep requires a pattern and file name".to_string(),
        });
    }

    let regex = Regex::new(&args[0])?;
    let path = ctx.cursor.resolve(&args[1]);

    let bytes = std::fs::read(&path).map_err(|err| Error::from_io_at(err, path.clone()))?;
    let content = String::from_utf8_lossy(&bytes);

    let matches: Vec<&str> = content
        .lines()
        .filter(|line| regex.is_match(line))
        .collect();

    if matches.is_empty() {
        return Ok(vec![OutputRecord::plain(format!(
            "No matches found in {}.",
            path.display()
        ))]);
    }

    let mut records = vec![OutputRecord::plain(format!(
        "Found {} matching lines in {}:",
        matches.len(),
        path.display()
    ))];
    records.extend(
        matches
            .into_iter()
            .map(|line| OutputRecord::plain(line.trim_end())),
    );

    Ok(records)
}
