//! clone command - Copy a remote repository
//!
//! The target directory is either given explicitly or derived from the last
//! segment of the URL. An existing target is refused before any network
//! access.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::CommandError;
use crate::cli::context::Context;
use crate::git::Git;
use crate::ui::output::{self, StdoutProgress};

/// Directory name implied by a clone URL.
///
/// Trailing separators are dropped, the last `/` or `\` separated segment
/// is taken and a trailing `.git` is stripped. Returns `None` when nothing
/// is left.
///
/// # Example
///
/// ```
/// use git_cli::cli::commands::derive_directory_name;
///
/// assert_eq!(
///     derive_directory_name("https://github.com/user/repo.git").as_deref(),
///     Some("repo")
/// );
/// ```
pub fn derive_directory_name(url: &str) -> Option<String> {
    let is_separator = |c: char| c == '/' || c == '\\';
    let trimmed = url.trim_end_matches(is_separator);
    let last = trimmed.rsplit(is_separator).next().unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Resolve the clone target: explicit directory or the name derived from
/// the URL, relative to `base`.
pub fn clone_target(url: &str, directory: Option<&str>, base: &Path) -> Option<PathBuf> {
    let name = match directory {
        Some(dir) if !dir.is_empty() => dir.to_string(),
        _ => derive_directory_name(url)?,
    };
    Some(base.join(name))
}

/// Existence check only; the target's contents are not inspected.
fn target_exists(path: &Path) -> bool {
    match std::fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != std::io::ErrorKind::NotFound,
    }
}

/// Clone `<url> [directory]`.
pub fn clone(ctx: &Context, args: &[String]) -> Result<()> {
    let usage = CommandError::Usage {
        message: "クローンするリポジトリのURLを指定してください",
        example: "git-cli clone https://github.com/user/repo.git",
    };

    let Some(url) = args.first() else {
        return Err(usage.into());
    };
    let base = ctx.work_dir()?;
    let Some(target) = clone_target(url, args.get(1).map(String::as_str), &base) else {
        return Err(usage.into());
    };

    // Display the directory the way the user would type it.
    let shown = target.strip_prefix(&base).unwrap_or(&target).display().to_string();

    if target_exists(&target) {
        return Err(CommandError::DirectoryExists(PathBuf::from(&shown)).into());
    }

    let verbosity = ctx.verbosity();

    output::print(
        format!("リポジトリをクローンしています: {} -> {}", url, shown),
        verbosity,
    );

    let progress = StdoutProgress::new(verbosity);
    Git::clone_into(url, &target, &progress).map_err(CommandError::Clone)?;

    output::print(format!("クローンが完了しました: {}", shown), verbosity);
    Ok(())
}
