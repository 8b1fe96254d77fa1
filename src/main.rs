//! mica - an interactive command shell
//!
//! Terminal frontend for the micashell interpreter core: reads lines
//! from stdin, renders tagged output records with ANSI colors on
//! stdout, and performs the session actions (clear, recall, exit)
//! the library hands back.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use micashell::error::Result;
use micashell::models::{OutputRecord, OutputTag};
use micashell::session::{Session, SessionAction};
use micashell::{handle_startup_error, NAME, VERSION};

/// Application configuration
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug mode
    debug: bool,
    /// Suppress the welcome banner
    no_banner: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--no-banner" | "-q" => {
                    app_args.no_banner = true;
                }
                "--help" | "-?" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("{} v{}", NAME, VERSION);
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
                arg => {
                    return Err(format!("Unexpected argument: {}", arg).into());
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("mica - an interactive command shell");
    println!();
    println!("USAGE:");
    println!("    mica [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug logging");
    println!("    -q, --no-banner        Skip the welcome banner");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    mica looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $XDG_CONFIG_HOME/micashell/config.toml");
    println!("    3. ~/.config/micashell/config.toml");
    println!("    4. ~/.micashell/config.toml");
    println!("    5. ./.micashell/config.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    MICASHELL_CONFIG       Path to configuration file");
    println!("    MICASHELL_DEBUG        Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn main() -> Result<()> {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        println!();
        print_help();
        process::exit(1);
    });

    // Initialize logging based on debug flag; records render on stdout,
    // so all diagnostics go to stderr
    let debug_env = env::var("MICASHELL_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);
    let log_level = if args.debug || debug_env { "debug" } else { "warn" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("🚀 Starting {} v{}", NAME, VERSION);

    let session = match load_session(&args) {
        Ok(session) => session,
        Err(e) => {
            error!("💥 Startup failed: {}", e);
            eprintln!("{}", handle_startup_error(&e));
            process::exit(1);
        }
    };

    run_repl(session, &args)?;

    info!("👋 {} shutdown complete", NAME);
    Ok(())
}

/// Build the session from --config, $MICASHELL_CONFIG, or the search paths
fn load_session(args: &AppArgs) -> Result<Session> {
    info!("⚙️  Loading configuration...");

    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("MICASHELL_CONFIG").ok().map(PathBuf::from));

    // An explicitly named config file must load; the search paths fall
    // back to defaults inside init()
    match config_path {
        Some(path) => micashell::init_with_config(&path),
        None => micashell::init(),
    }
}

/// Read lines, dispatch them, render the records, perform the actions
fn run_repl(mut session: Session, args: &AppArgs) -> Result<()> {
    let mut stdout = io::stdout();
    let mut input = io::stdin().lock();

    if session.config().shell.show_welcome && !args.no_banner {
        render_record(&session.welcome_banner());
    }

    let prompt = session.config().shell.prompt.clone();
    // Recalled history entry waiting at the prompt (empty line submits it)
    let mut pending_recall: Option<String> = None;
    // Exit requested while background tasks exist
    let mut awaiting_exit_confirmation = false;

    loop {
        if awaiting_exit_confirmation {
            print!("There are background tasks running. Do you want to exit anyway? [y/N] ");
        } else if let Some(text) = &pending_recall {
            print!("{}{} ", prompt, text);
        } else {
            print!("{}", prompt);
        }
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF: treat like a plain exit
            break;
        }

        if awaiting_exit_confirmation {
            let answer = line.trim().to_lowercase();
            if answer == "y" || answer == "yes" {
                break;
            }
            awaiting_exit_confirmation = false;
            continue;
        }

        // An empty line at a recall prompt submits the recalled text
        let line = match pending_recall.take() {
            Some(recalled) if line.trim().is_empty() => recalled,
            _ => line,
        };

        let outcome = session.dispatch(&line);
        for record in &outcome.records {
            render_record(record);
        }

        match outcome.action {
            Some(SessionAction::ClearLog) => {
                print!("\x1b[2J\x1b[1;1H");
                stdout.flush()?;
            }
            Some(SessionAction::Recall(text)) => {
                pending_recall = Some(text);
            }
            Some(SessionAction::Exit { needs_confirmation }) => {
                if needs_confirmation {
                    awaiting_exit_confirmation = true;
                } else {
                    break;
                }
            }
            None => {}
        }
    }

    Ok(())
}

/// Print one record with its tag color
fn render_record(record: &OutputRecord) {
    println!("{}", colorize(record));
}

/// Wrap a record's text in the ANSI color for its tag
fn colorize(record: &OutputRecord) -> String {
    let code = match record.tag {
        OutputTag::None => return record.text.clone(),
        OutputTag::Error => "\x1b[31m",
        OutputTag::Success => "\x1b[32m",
        OutputTag::Info => "\x1b[33m",
        OutputTag::Input => "\x1b[36m",
    };
    format!("{}{}\x1b[0m", code, record.text)
}
