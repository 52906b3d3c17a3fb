//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! All command output goes to stdout, errors included, with the localized
//! `エラー:` prefix. Informational output respects the quiet flag; errors
//! are always shown. Diagnostics belong to the `log` facade (stderr).

use std::cell::Cell;
use std::fmt::Display;
use std::io::Write;

use crate::git::CloneProgress;

/// Prefix printed in front of every error message.
pub const ERROR_PREFIX: &str = "エラー: ";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    println!("{}", format_error(message));
}

/// Format an error line with the localized prefix.
pub fn format_error(message: impl Display) -> String {
    format!("{}{}", ERROR_PREFIX, message)
}

/// Clone progress written to stdout.
///
/// Object counts are redrawn in place with a carriage return; the line is
/// finished once every object has arrived.
#[derive(Debug)]
pub struct StdoutProgress {
    verbosity: Verbosity,
    finished: Cell<bool>,
}

impl StdoutProgress {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            finished: Cell::new(false),
        }
    }
}

impl CloneProgress for StdoutProgress {
    fn remote_message(&self, message: &[u8]) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(message);
        let _ = stdout.flush();
    }

    fn transfer(&self, received_objects: usize, total_objects: usize, received_bytes: usize) {
        if self.verbosity == Verbosity::Quiet || self.finished.get() || total_objects == 0 {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        let _ = write!(
            stdout,
            "\rオブジェクトを受信中: {}/{} ({} KiB)",
            received_objects,
            total_objects,
            received_bytes / 1024
        );
        if received_objects == total_objects {
            let _ = writeln!(stdout);
            self.finished.set(true);
        }
        let _ = stdout.flush();
    }
}
