//! log command - Show recent commits
//!
//! Walks history from HEAD newest-first and prints `<short hash> <summary>`
//! for at most `limit` commits.

use anyhow::Result;

use crate::cli::context::Context;
use crate::ui::output;

/// Resolve the number of commits to show.
///
/// The arguments are only scanned when one of them contains a hyphen. The
/// first `-n` followed by a value sets the limit if the value parses as a
/// non-negative integer; otherwise `default` is kept without complaint.
pub fn parse_log_limit(args: &[String], default: usize) -> usize {
    if !args.iter().any(|a| a.contains('-')) {
        return default;
    }

    args.windows(2)
        .find(|pair| pair[0] == "-n")
        .and_then(|pair| pair[1].trim().parse::<usize>().ok())
        .unwrap_or(default)
}

/// Print recent commits.
pub fn log(ctx: &Context, args: &[String]) -> Result<()> {
    let git = ctx.open_repo()?;
    let config = ctx.config(Some(git.work_dir()?))?;
    let limit = parse_log_limit(args, config.log_limit());
    let verbosity = ctx.verbosity();

    log::debug!("log limit {}", limit);
    for commit in git.log()?.take(limit) {
        let commit = commit?;
        output::print(
            format!("{} {}", commit.oid.short_hash(), commit.summary),
            verbosity,
        );
    }
    Ok(())
}
