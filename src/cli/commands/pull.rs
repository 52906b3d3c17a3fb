//! pull command - Fetch and fast-forward the current branch

use anyhow::Result;

use super::CommandError;
use crate::cli::context::Context;
use crate::git::SyncOutcome;
use crate::ui::output;

/// Pull the current branch from `origin` (or the configured remote).
pub fn pull(ctx: &Context) -> Result<()> {
    let git = ctx.open_repo()?;
    let config = ctx.config(Some(git.work_dir()?))?;
    let verbosity = ctx.verbosity();

    log::debug!("pulling from {}", config.remote());
    match git.pull(config.remote()).map_err(CommandError::Pull)? {
        SyncOutcome::AlreadyUpToDate => output::print("既に最新の状態です", verbosity),
        SyncOutcome::Updated => output::print("プルが完了しました", verbosity),
    }
    Ok(())
}
