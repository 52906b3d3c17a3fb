//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the git interface
//! 3. Formats and displays output
//!
//! Handlers return `anyhow::Result`. Failures bubble up to `main`, which
//! prints them with the `エラー:` prefix and exits with status 1. Outcomes
//! that are not failures ("already up to date") are printed here and
//! return `Ok`.

mod add;
mod clone;
mod commit;
mod log_cmd;
mod pull;
mod push;
mod status;

// Re-export command functions for testing and direct invocation
pub use add::add;
pub use clone::{clone, clone_target, derive_directory_name};
pub use commit::{commit, parse_commit_message};
pub use log_cmd::{log, parse_log_limit};
pub use pull::pull;
pub use push::push;
pub use status::{status, status_symbol};

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use crate::cli::args::Command;
use crate::cli::context::Context;
use crate::cli::usage;
use crate::git::GitError;

/// Handler-level failures that are not plain git errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or malformed arguments.
    #[error("{message}\n使用例: {example}")]
    Usage {
        message: &'static str,
        example: &'static str,
    },

    /// Some paths given to `add` could not be staged.
    #[error("{failed} 件のファイルを追加できませんでした")]
    PartialAdd { failed: usize },

    /// Clone target already exists.
    #[error("ディレクトリ '{}' は既に存在します", .0.display())]
    DirectoryExists(PathBuf),

    #[error("プッシュに失敗しました: {0}")]
    Push(#[source] GitError),

    #[error("プルに失敗しました: {0}")]
    Pull(#[source] GitError),

    #[error("クローンに失敗しました: {0}")]
    Clone(#[source] GitError),
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Status { .. } => status::status(ctx),
        Command::Add { paths } => add::add(ctx, &paths),
        Command::Commit { args } => commit::commit(ctx, &args),
        Command::Push { .. } => push::push(ctx),
        Command::Pull { .. } => pull::pull(ctx),
        Command::Log { args } => log_cmd::log(ctx, &args),
        Command::Clone { args } => clone::clone(ctx, &args),
        Command::Help { .. } => {
            usage::print_usage();
            Ok(())
        }
        Command::Unknown(args) => {
            let name = args.first().map(String::as_str).unwrap_or_default();
            usage::print_unknown_command(name);
            Ok(())
        }
    }
}
