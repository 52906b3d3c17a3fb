//! cli::context
//!
//! Per-invocation execution context shared by all command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::git::{Git, Identity};
use crate::ui::output::Verbosity;

/// Execution context built from the global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (errors only).
    pub quiet: bool,
}

impl Context {
    /// Directory the command operates in.
    pub fn work_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("現在のディレクトリを取得できませんでした"),
        }
    }

    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Open the repository rooted at the working directory.
    pub fn open_repo(&self) -> Result<Git> {
        let dir = self.work_dir()?;
        log::debug!("opening repository at {}", dir.display());
        Ok(Git::open(&dir)?)
    }

    /// Load configuration, including the repository scope when given.
    pub fn config(&self, work_dir: Option<&Path>) -> Result<Config> {
        let config = Config::load(work_dir)?;
        if let Some(path) = config.global_config_loaded_from() {
            log::debug!("global config: {}", path.display());
        }
        if let Some(path) = config.repo_config_loaded_from() {
            log::debug!("repo config: {}", path.display());
        }
        Ok(config)
    }
}

/// Commit identity from configuration.
pub fn identity(config: &Config) -> Identity {
    Identity::new(config.author_name(), config.author_email())
}
