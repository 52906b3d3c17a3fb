//! status command - List changed files
//!
//! Prints one line per path whose staging or worktree state differs from
//! HEAD, using a two-column short code in the style of `git status -s`.

use anyhow::Result;

use crate::cli::context::Context;
use crate::git::{FileState, FileStatus};
use crate::ui::output;

/// Two-character display code for a status entry.
///
/// Priority: untracked, staged added, staged modified, unstaged modified,
/// unstaged deleted, blank.
pub fn status_symbol(file: &FileStatus) -> &'static str {
    if file.staging == FileState::Untracked {
        "??"
    } else if file.staging == FileState::Added {
        "A "
    } else if file.staging == FileState::Modified {
        "M "
    } else if file.worktree == FileState::Modified {
        " M"
    } else if file.worktree == FileState::Deleted {
        " D"
    } else {
        "  "
    }
}

/// Show the working tree status.
pub fn status(ctx: &Context) -> Result<()> {
    let git = ctx.open_repo()?;
    let files = git.status()?;
    let verbosity = ctx.verbosity();

    if files.is_empty() {
        output::print("作業ディレクトリはクリーンです", verbosity);
        return Ok(());
    }

    output::print("変更されたファイル:", verbosity);
    for file in &files {
        output::print(format!("{} {}", status_symbol(file), file.path), verbosity);
    }
    Ok(())
}
