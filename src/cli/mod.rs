//! cli
//!
//! Command-line interface layer for git-cli.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Route the first argument to exactly one handler
//! - Print usage for `help`, missing or unknown commands
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! handlers in [`commands`], which talk to the repository only through
//! [`crate::git::Git`].

pub mod args;
pub mod commands;
pub mod context;
pub mod usage;

pub use args::{Cli, Command};
pub use context::Context;

use std::ffi::OsString;

use anyhow::Result;
use clap::error::{ContextKind, ContextValue, ErrorKind};

/// Run the CLI application with the process arguments.
///
/// This is the main entry point called from `main.rs`. An `Err` means a
/// handler reported a failure; the caller prints it and exits non-zero.
pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}

/// Run the CLI against an explicit argument vector (program name first).
pub fn run_from<I, T>(argv: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    let cli = match Cli::try_parse_args(argv.iter().cloned()) {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(err, &argv),
    };

    init_logging(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    if cli.help {
        usage::print_usage();
        return Ok(());
    }

    match cli.command {
        Some(command) => commands::dispatch(command, &ctx),
        None => {
            usage::print_usage();
            Ok(())
        }
    }
}

/// How a rejected command line is reported.
#[derive(Debug, PartialEq, Eq)]
enum ParseFailure {
    /// Not a command or flag git-cli knows.
    UnknownCommand(String),
    /// A known option with a missing or bad value.
    InvalidOption(String),
}

/// Classify a clap rejection, naming the offending argument from clap's
/// error context when it has one.
fn classify_parse_error(err: &clap::Error, argv: &[OsString]) -> ParseFailure {
    let context_name = [ContextKind::InvalidSubcommand, ContextKind::InvalidArg]
        .into_iter()
        .find_map(|kind| match err.get(kind) {
            // "--cwd <CWD>" is reported as "--cwd"
            Some(ContextValue::String(value)) => {
                value.split_whitespace().next().map(str::to_string)
            }
            _ => None,
        });
    let name = context_name.unwrap_or_else(|| {
        argv.get(1)
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    match err.kind() {
        ErrorKind::UnknownArgument | ErrorKind::InvalidSubcommand => {
            ParseFailure::UnknownCommand(name)
        }
        _ => ParseFailure::InvalidOption(name),
    }
}

/// Version output is passed through; other rejections print a one-line
/// reason followed by the usage text.
fn handle_parse_error(err: clap::Error, argv: &[OsString]) -> Result<()> {
    init_logging(false);

    match err.kind() {
        ErrorKind::DisplayVersion | ErrorKind::DisplayHelp => {
            print!("{}", err);
        }
        _ => {
            log::debug!("argument parsing failed: {}", err);
            match classify_parse_error(&err, argv) {
                ParseFailure::UnknownCommand(name) => usage::print_unknown_command(&name),
                ParseFailure::InvalidOption(name) => usage::print_invalid_option(&name),
            }
        }
    }
    Ok(())
}

/// Route `log` output to stderr; `--debug` forces debug level, otherwise
/// `RUST_LOG` applies with a `warn` default.
fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // Ignored when a logger is already installed.
    let _ = builder.try_init();
}
