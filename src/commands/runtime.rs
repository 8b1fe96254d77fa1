//! Runtime Commands
//!
//! Session-facing builtins that report state rather than touch the
//! filesystem: working directory, echo, history listing, user and
//! clock info, the clear/help text, and the background-task stubs.

use chrono::Local;

use crate::commands::CommandContext;
use crate::error::Result;
use crate::models::OutputRecord;

/// Print the working directory
pub fn print_working_directory(ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    Ok(vec![OutputRecord::plain(
        ctx.cursor.current().display().to_string(),
    )])
}

/// Print the arguments joined by single spaces, with no expansion
pub fn echo(args: &[String]) -> Result<Vec<OutputRecord>> {
    Ok(vec![OutputRecord::plain(args.join(" "))])
}

/// Confirm the clear; the session itself empties the log
pub fn clear() -> Result<Vec<OutputRecord>> {
    Ok(vec![OutputRecord::success("Terminal cleared")])
}

/// List every history entry as `index: text`
pub fn history(ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if ctx.history.is_empty() {
        return Ok(vec![OutputRecord::info("No command history available")]);
    }

    let mut records = vec![OutputRecord::plain("Command History:")];
    records.extend(
        ctx.history
            .iter()
            .map(|entry| OutputRecord::plain(format!("{}: {}", entry.index, entry.text))),
    );
    Ok(records)
}

/// Report the current user from the environment
pub fn whoami() -> Result<Vec<OutputRecord>> {
    let user = std::env::var("USER").or_else(|_| std::env::var("USERNAME"));
    match user {
        Ok(name) => Ok(vec![OutputRecord::info(format!("Current user: {}", name))]),
        Err(_) => Ok(vec![OutputRecord::error(
            "Error retrieving user info: no USER or USERNAME in environment",
        )]),
    }
}

/// Print the local date and time
pub fn date() -> Result<Vec<OutputRecord>> {
    Ok(vec![OutputRecord::plain(
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    )])
}

/// Background execution stub
pub fn background() -> Result<Vec<OutputRecord>> {
    Ok(vec![OutputRecord::info(
        "Background tasks are not implemented yet.",
    )])
}

/// Background job listing stub
pub fn jobs() -> Result<Vec<OutputRecord>> {
    Ok(vec![OutputRecord::info(
        "Background jobs are not implemented yet.",
    )])
}

/// Print the command reference as a single block
pub fn help() -> Result<Vec<OutputRecord>> {
    let text = "\
Available commands:
- ls, dir: List directory contents
- cd: Change directory
- mkdir: Create a new directory
- touch, new-item: Create a new file
- rm, del: Remove a file or directory
- cp, copy: Copy files or directories
- mv, move: Move files or directories
- cat, type: Display file contents
- pwd: Print working directory
- echo: Print text to terminal
- clear, cls: Clear terminal output
- find, search: Find files and directories
- grep: Search for text in files
- chmod: Change file permissions
- history: Show command history
- zip, compress: Compress files into a zip archive
- unzip, extract: Extract files from a zip archive
- whoami: Show current user information
- date: Show current date and time
- bg: Run command in background (not implemented)
- jobs: List background jobs (not implemented)
- help: Show this command reference
- exit, quit: Close the session
- !N: Recall history entry N into the input line";

    Ok(vec![OutputRecord::info(text)])
}
