//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! Each subcommand collects its raw trailing arguments. The command-specific
//! positional rules (`commit -m <message>`, `log -n <count>`,
//! `clone <url> [directory]`) are applied by the handlers so that malformed
//! input gets the localized usage message instead of a clap error.
//!
//! # Global Flags
//!
//! - `-h` / `--help`: Show usage
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if started in that directory
//! - `--debug`: Enable debug logging on stderr
//! - `--quiet` / `-q`: Errors only

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Lightweight git command line built on libgit2
#[derive(Parser, Debug)]
#[command(name = "git-cli")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Run as if git-cli was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show usage
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse an argument vector (first element is the program name).
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// 作業ディレクトリの状態を表示
    #[command(name = "status")]
    Status {
        #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// ファイルをステージングエリアに追加
    #[command(name = "add")]
    Add {
        /// Paths to stage, or `.` for everything
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        paths: Vec<String>,
    },

    /// 変更をコミット
    #[command(name = "commit")]
    Commit {
        /// `-m <message>`
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// リモートリポジトリにプッシュ
    #[command(name = "push")]
    Push {
        #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// リモートリポジトリから取得
    #[command(name = "pull")]
    Pull {
        #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// コミット履歴を表示
    #[command(name = "log")]
    Log {
        /// Optional `-n <count>`
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// リポジトリをクローン
    #[command(name = "clone")]
    Clone {
        /// `<url> [directory]`
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// このヘルプを表示
    #[command(name = "help")]
    Help {
        #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Anything else; reported as an unknown command.
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}
