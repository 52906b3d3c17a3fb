//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! git-cli has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! Neither is required. With no files present every accessor returns the
//! built-in default (placeholder author, remote `origin`, log limit 10).
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI arguments (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GIT_CLI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/git-cli/config.toml`
//! 3. `~/.git-cli/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use git_cli::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! println!("Remote: {}", config.remote());
//! println!("Author: {} <{}>", config.author_name(), config.author_email());
//! ```

pub mod schema;

pub use schema::{AuthorConfig, GlobalConfig, LogDefaults, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Author name used when no identity is configured.
pub const DEFAULT_AUTHOR_NAME: &str = "Git CLI User";
/// Author email used when no identity is configured.
pub const DEFAULT_AUTHOR_EMAIL: &str = "user@git-cli.local";
/// Remote used by push and pull when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";
/// Number of commits printed by `log` without `-n`.
pub const DEFAULT_LOG_LIMIT: usize = 10;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定ファイル '{path}' を読み込めませんでした: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("設定ファイル '{path}' を解析できませんでした: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("設定値が不正です: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically. Repo config overrides
/// global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `work_dir` is provided, also loads repo-specific config from
    /// `<work_dir>/.git/git-cli/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or
    /// contain invalid values. Missing files are not an error.
    pub fn load(work_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path) = match work_dir {
            Some(dir) => Self::load_repo(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        log::debug!(
            "config loaded (global: {:?}, repo: {:?})",
            global_path,
            repo_path
        );

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var("GIT_CLI_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("git-cli/config.toml");
            if path.exists() {
                let config = read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".git-cli/config.toml");
            if path.exists() {
                let config = read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_repo(work_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(work_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = read_toml(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Get the canonical path for repo config.
    pub fn repo_config_path(work_dir: &Path) -> PathBuf {
        work_dir.join(".git/git-cli/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn author_field(&self, pick: impl Fn(&AuthorConfig) -> Option<&String>) -> Option<&str> {
        let repo = self.repo.as_ref().and_then(|r| r.author.as_ref()).and_then(&pick);
        let global = self.global.author.as_ref().and_then(&pick);
        repo.or(global).map(String::as_str)
    }

    /// Author name for new commits.
    pub fn author_name(&self) -> &str {
        self.author_field(|a| a.name.as_ref())
            .unwrap_or(DEFAULT_AUTHOR_NAME)
    }

    /// Author email for new commits.
    pub fn author_email(&self) -> &str {
        self.author_field(|a| a.email.as_ref())
            .unwrap_or(DEFAULT_AUTHOR_EMAIL)
    }

    /// Get the remote name.
    ///
    /// Repo config wins over global config; defaults to "origin".
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .or(self.global.remote.as_deref())
            .unwrap_or(DEFAULT_REMOTE)
    }

    /// Default number of commits shown by `log`.
    pub fn log_limit(&self) -> usize {
        let repo = self.repo.as_ref().and_then(|r| r.log.as_ref()).and_then(|l| l.limit);
        let global = self.global.log.as_ref().and_then(|l| l.limit);
        repo.or(global).unwrap_or(DEFAULT_LOG_LIMIT)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
