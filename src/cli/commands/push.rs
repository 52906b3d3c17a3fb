//! push command - Send local branches to the remote

use anyhow::Result;

use super::CommandError;
use crate::cli::context::Context;
use crate::git::SyncOutcome;
use crate::ui::output;

/// Push to the configured remote (default `origin`).
pub fn push(ctx: &Context) -> Result<()> {
    let git = ctx.open_repo()?;
    let config = ctx.config(Some(git.work_dir()?))?;
    let verbosity = ctx.verbosity();

    log::debug!("pushing to {}", config.remote());
    match git.push(config.remote()).map_err(CommandError::Push)? {
        SyncOutcome::AlreadyUpToDate => output::print("既に最新の状態です", verbosity),
        SyncOutcome::Updated => output::print("プッシュが完了しました", verbosity),
    }
    Ok(())
}
