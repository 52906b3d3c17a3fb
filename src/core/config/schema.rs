//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GIT_CLI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/git-cli/config.toml`
//! 3. `~/.git-cli/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/git-cli/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a typo in the author
//! email surfaces at load time instead of ending up in a commit.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// remote = "origin"
///
/// [author]
/// name = "Taro Yamada"
/// email = "taro@example.com"
///
/// [log]
/// limit = 20
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Remote used by push and pull (default: "origin")
    pub remote: Option<String>,

    /// Identity used for new commits
    pub author: Option<AuthorConfig>,

    /// Log command defaults
    pub log: Option<LogDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_remote(self.remote.as_deref())?;
        if let Some(author) = &self.author {
            author.validate()?;
        }
        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// remote = "upstream"
///
/// [author]
/// email = "taro@work.example.com"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Remote name (default: "origin")
    pub remote: Option<String>,

    /// Identity override for this repository
    pub author: Option<AuthorConfig>,

    /// Log command overrides for this repository
    pub log: Option<LogDefaults>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_remote(self.remote.as_deref())?;

        if let Some(author) = &self.author {
            author.validate()?;
        }

        Ok(())
    }
}

fn validate_remote(remote: Option<&str>) -> Result<(), ConfigError> {
    match remote {
        Some(name) if name.trim().is_empty() => Err(ConfigError::InvalidValue(
            "remote cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Commit author identity.
///
/// Either field may be omitted; missing fields fall back to the next
/// scope and finally to the built-in placeholder identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AuthorConfig {
    /// Validate the author identity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "author name cannot be empty".to_string(),
                ));
            }
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid author email '{}'",
                    email
                )));
            }
        }
        Ok(())
    }
}

/// Log command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogDefaults {
    /// Number of commits shown when `-n` is not given
    pub limit: Option<usize>,
}
