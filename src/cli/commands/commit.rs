//! commit command - Record staged changes
//!
//! Only the form `commit -m <message>` is accepted.

use anyhow::Result;

use super::CommandError;
use crate::cli::context::{identity, Context};
use crate::ui::output;

/// Extract the message from `-m <message>`.
///
/// Returns `None` unless the first argument is exactly `-m` and a message
/// follows it. Anything after the message is ignored.
pub fn parse_commit_message(args: &[String]) -> Option<&str> {
    match args {
        [flag, message, ..] if flag == "-m" => Some(message.as_str()),
        _ => None,
    }
}

/// Commit the index on the current branch.
pub fn commit(ctx: &Context, args: &[String]) -> Result<()> {
    let message = parse_commit_message(args).ok_or(CommandError::Usage {
        message: "コミットメッセージを指定してください",
        example: "git-cli commit -m \"コミットメッセージ\"",
    })?;

    let git = ctx.open_repo()?;
    let config = ctx.config(Some(git.work_dir()?))?;
    let author = identity(&config);

    let oid = git.commit(message, &author)?;

    output::print(
        format!("コミットが作成されました: {}", oid.short_hash()),
        ctx.verbosity(),
    );
    Ok(())
}
