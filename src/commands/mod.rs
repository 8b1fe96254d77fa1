//! Builtin Command Table
//!
//! Maps command names (and their aliases) to handlers and defines the
//! contract every handler follows: arguments in, a list of tagged
//! output records out. Handlers receive a [`CommandContext`] instead of
//! touching session state directly, so the same table can serve any
//! number of sessions.

pub mod archive;
pub mod fs;
pub mod listing;
pub mod runtime;
pub mod search;
pub mod view;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::config::Config;
use crate::cursor::DirectoryCursor;
use crate::error::Result;
use crate::history::HistoryRing;
use crate::models::OutputRecord;

/// Identity of a builtin command, independent of the alias used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Ls,
    Cd,
    Mkdir,
    Touch,
    Rm,
    Cp,
    Mv,
    Cat,
    Pwd,
    Echo,
    Clear,
    Find,
    Grep,
    Chmod,
    History,
    Zip,
    Unzip,
    Whoami,
    Date,
    Bg,
    Jobs,
    Help,
    Exit,
}

/// Every accepted command name mapped to its builtin
static ALIASES: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    use Builtin::*;

    let entries: [(&'static str, Builtin); 34] = [
        ("ls", Ls),
        ("dir", Ls),
        ("cd", Cd),
        ("mkdir", Mkdir),
        ("touch", Touch),
        ("new-item", Touch),
        ("rm", Rm),
        ("del", Rm),
        ("cp", Cp),
        ("copy", Cp),
        ("mv", Mv),
        ("move", Mv),
        ("cat", Cat),
        ("type", Cat),
        ("pwd", Pwd),
        ("echo", Echo),
        ("clear", Clear),
        ("cls", Clear),
        ("find", Find),
        ("search", Find),
        ("grep", Grep),
        ("chmod", Chmod),
        ("history", History),
        ("zip", Zip),
        ("compress", Zip),
        ("unzip", Unzip),
        ("extract", Unzip),
        ("whoami", Whoami),
        ("date", Date),
        ("bg", Bg),
        ("jobs", Jobs),
        ("help", Help),
        ("exit", Exit),
        ("quit", Exit),
    ];

    entries.into_iter().collect()
});

impl Builtin {
    /// Look up a command name in the alias table
    ///
    /// Names are matched exactly; the dispatcher lowercases the head
    /// token before calling this.
    pub fn lookup(name: &str) -> Option<Builtin> {
        ALIASES.get(name).copied()
    }

    /// The primary name for this builtin
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Builtin::Ls => "ls",
            Builtin::Cd => "cd",
            Builtin::Mkdir => "mkdir",
            Builtin::Touch => "touch",
            Builtin::Rm => "rm",
            Builtin::Cp => "cp",
            Builtin::Mv => "mv",
            Builtin::Cat => "cat",
            Builtin::Pwd => "pwd",
            Builtin::Echo => "echo",
            Builtin::Clear => "clear",
            Builtin::Find => "find",
            Builtin::Grep => "grep",
            Builtin::Chmod => "chmod",
            Builtin::History => "history",
            Builtin::Zip => "zip",
            Builtin::Unzip => "unzip",
            Builtin::Whoami => "whoami",
            Builtin::Date => "date",
            Builtin::Bg => "bg",
            Builtin::Jobs => "jobs",
            Builtin::Help => "help",
            Builtin::Exit => "exit",
        }
    }

    /// All accepted command names, sorted, for completion and help
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = ALIASES.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Check whether a name resolves to a builtin
pub fn is_builtin(name: &str) -> bool {
    Builtin::lookup(name).is_some()
}

/// Everything a builtin handler may touch during one dispatch
pub struct CommandContext<'a> {
    /// Working directory cursor; mutable so `cd` can move it
    pub cursor: &'a mut DirectoryCursor,
    /// Session history, read-only
    pub history: &'a HistoryRing,
    /// Session configuration
    pub config: &'a Config,
}

/// Execute a builtin with the arguments that followed its name
///
/// An `Err` stands for a whole-command failure and is rendered as a
/// single error record by the caller. Handlers that work through
/// several targets report per-target outcomes in the record list and
/// return `Ok`.
pub fn run(builtin: Builtin, args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    match builtin {
        Builtin::Ls => listing::list_directory(args, ctx),
        Builtin::Cd => fs::change_directory(args, ctx),
        Builtin::Mkdir => fs::make_directory(args, ctx),
        Builtin::Touch => fs::create_file(args, ctx),
        Builtin::Rm => fs::remove(args, ctx),
        Builtin::Cp => fs::copy(args, ctx),
        Builtin::Mv => fs::move_entries(args, ctx),
        Builtin::Cat => view::cat_file(args, ctx),
        Builtin::Pwd => runtime::print_working_directory(ctx),
        Builtin::Echo => runtime::echo(args),
        Builtin::Clear => runtime::clear(),
        Builtin::Find => search::find(args, ctx),
        Builtin::Grep => search::grep(args, ctx),
        Builtin::Chmod => fs::change_mode(args, ctx),
        Builtin::History => runtime::history(ctx),
        Builtin::Zip => archive::zip(args, ctx),
        Builtin::Unzip => archive::unzip(args, ctx),
        Builtin::Whoami => runtime::whoami(),
        Builtin::Date => runtime::date(),
        Builtin::Bg => runtime::background(),
        Builtin::Jobs => runtime::jobs(),
        Builtin::Help => runtime::help(),
        // The session attaches the exit action; there is nothing to print
        Builtin::Exit => Ok(Vec::new()),
    }
}
