//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads and
//! writes flow through [`Git`]. No other module imports `git2`, and nothing
//! shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Opening the repository at the working directory
//! - Worktree status and staging
//! - Creating commits and walking history
//! - Push, pull (fast-forward) and clone over libgit2 transports
//!
//! # Example
//!
//! ```ignore
//! use git_cli::git::{Git, Identity};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! git.stage("README.md")?;
//! let oid = git.commit("docs: update readme", &Identity::new("Taro", "taro@example.com"))?;
//! println!("{}", oid.short_hash());
//! ```

mod interface;

pub use interface::{
    CloneProgress, CommitInfo, CommitIter, FileState, FileStatus, Git, GitError, Identity,
    SyncOutcome,
};
