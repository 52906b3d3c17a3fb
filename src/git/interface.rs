//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! git-cli. The capability set is deliberately narrow: open, status, stage,
//! commit, push, pull, log and clone. Everything else (object storage,
//! transports, the index format) is libgit2's business.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants so handlers can word
//! them for the user:
//! - [`GitError::NotARepo`]: The directory is not a Git repository
//! - [`GitError::UnbornHead`]: HEAD has no commits yet
//! - [`GitError::NothingToCommit`]: The index matches HEAD
//! - [`GitError::NonFastForward`]: Push or pull would require a real merge
//! - [`GitError::Network`]: Transport or authentication failure
//!
//! "Already up to date" is not an error; push and pull report it through
//! [`SyncOutcome::AlreadyUpToDate`].
//!
//! # Example
//!
//! ```ignore
//! use git_cli::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for commit in git.log()?.take(5) {
//!     let commit = commit?;
//!     println!("{} {}", commit.oid.short_hash(), commit.summary);
//! }
//! ```

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The directory is not a Git repository.
    #[error("gitリポジトリが見つかりません: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("ベアリポジトリはサポートされていません")]
    BareRepo,

    /// HEAD points at a branch with no commits.
    #[error("コミットがまだありません")]
    UnbornHead,

    /// HEAD is detached, so there is no current branch.
    #[error("HEADがブランチを指していません")]
    DetachedHead,

    /// A path given to stage exists neither on disk nor in the index.
    #[error("パスが見つかりません: {path}")]
    PathNotFound {
        /// The path as given by the user
        path: String,
    },

    /// The index has no changes relative to HEAD.
    #[error("コミットする変更がありません")]
    NothingToCommit,

    /// The named remote is not configured.
    #[error("リモート '{name}' が見つかりません")]
    RemoteNotFound {
        /// The remote name
        name: String,
    },

    /// Local and remote history have diverged.
    #[error("非fast-forwardの更新はサポートされていません")]
    NonFastForward,

    /// The remote refused one or more ref updates.
    #[error("リモートが更新を拒否しました: {details}")]
    PushRejected {
        /// Per-ref rejection messages
        details: String,
    },

    /// Transport, authentication or protocol failure.
    #[error("ネットワークエラー: {message}")]
    Network {
        /// The error message
        message: String,
    },

    /// Invalid object id coming back from libgit2.
    #[error("不正なオブジェクトID: {0}")]
    InvalidOid(String),

    /// Internal git2 error.
    #[error("gitエラー: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        if err.code() == git2::ErrorCode::NotFastForward {
            return GitError::NonFastForward;
        }
        match err.class() {
            git2::ErrorClass::Net
            | git2::ErrorClass::Http
            | git2::ErrorClass::Ssh
            | git2::ErrorClass::Ssl
            | git2::ErrorClass::Callback => GitError::Network {
                message: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid(msg),
        }
    }
}

/// State of a path in one of the two status columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Unmodified,
    Untracked,
    Added,
    Modified,
    Deleted,
}

/// Status of a single path: staging area column and worktree column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Path relative to the worktree root
    pub path: String,
    /// State in the staging area (index vs HEAD)
    pub staging: FileState,
    /// State in the worktree (files vs index)
    pub worktree: FileState,
}

impl FileStatus {
    fn from_git2(path: String, status: git2::Status) -> Self {
        let staging = if status.is_conflicted() {
            FileState::Modified
        } else if status.is_index_new() {
            FileState::Added
        } else if status.is_index_deleted() {
            FileState::Deleted
        } else if status.is_index_modified()
            || status.is_index_renamed()
            || status.is_index_typechange()
        {
            FileState::Modified
        } else if status.is_wt_new() {
            FileState::Untracked
        } else {
            FileState::Unmodified
        };

        let worktree = if status.is_wt_new() {
            FileState::Untracked
        } else if status.is_wt_deleted() {
            FileState::Deleted
        } else if status.is_conflicted()
            || status.is_wt_modified()
            || status.is_wt_renamed()
            || status.is_wt_typechange()
        {
            FileState::Modified
        } else {
            FileState::Unmodified
        };

        Self {
            path,
            staging,
            worktree,
        }
    }

    /// True when neither column reports a change.
    pub fn is_unmodified(&self) -> bool {
        self.staging == FileState::Unmodified && self.worktree == FileState::Unmodified
    }
}

/// Information about a commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub author_time: chrono::DateTime<chrono::Utc>,
}

/// Name and email recorded on new commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Result of a push or pull that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Refs were transferred.
    Updated,
    /// Nothing to transfer.
    AlreadyUpToDate,
}

/// Receiver for clone progress.
///
/// Methods take `&self` because libgit2 drives several callbacks from one
/// transfer and they all report to the same sink.
pub trait CloneProgress {
    /// Raw progress text sent by the remote (e.g. "Counting objects").
    fn remote_message(&self, message: &[u8]);

    /// Object transfer statistics.
    fn transfer(&self, received_objects: usize, total_objects: usize, received_bytes: usize);
}

/// Iterator over commits reachable from HEAD, newest first.
///
/// Bound it with [`Iterator::take`] to show a limited history.
pub struct CommitIter<'repo> {
    repo: &'repo git2::Repository,
    walk: git2::Revwalk<'repo>,
}

impl Iterator for CommitIter<'_> {
    type Item = Result<CommitInfo, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = match self.walk.next()? {
            Ok(oid) => oid,
            Err(e) => return Some(Err(e.into())),
        };
        let info = self
            .repo
            .find_commit(oid)
            .map_err(GitError::from)
            .and_then(|commit| commit_info(&commit));
        Some(info)
    }
}

fn commit_info(commit: &git2::Commit<'_>) -> Result<CommitInfo, GitError> {
    let author = commit.author();
    let author_time = chrono::DateTime::from_timestamp(author.when().seconds(), 0)
        .unwrap_or_default();
    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
    let summary = message.lines().next().unwrap_or_default().to_string();

    Ok(CommitInfo {
        oid: Oid::new(commit.id().to_string())?,
        summary,
        message,
        author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
        author_time,
    })
}

/// Maximum credential attempts before giving up on a remote.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Build remote callbacks that authenticate like the git CLI does.
///
/// Tried in order: the configured credential helper, the ssh agent, a bare
/// username, then libgit2's default credentials.
fn credential_callbacks<'a>(config: Option<git2::Config>) -> git2::RemoteCallbacks<'a> {
    let mut attempts = 0usize;
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |url, username, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("認証に失敗しました"));
        }
        log::debug!("credentials requested for {} ({:?})", url, allowed);

        if allowed.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(cfg) = &config {
                if let Ok(cred) = git2::Cred::credential_helper(cfg, url, username) {
                    return Ok(cred);
                }
            }
        }
        if allowed.contains(git2::CredentialType::SSH_KEY) {
            if let Some(user) = username {
                return git2::Cred::ssh_key_from_agent(user);
            }
        }
        if allowed.contains(git2::CredentialType::USERNAME) {
            return git2::Cred::username(username.unwrap_or("git"));
        }
        git2::Cred::default()
    });
    callbacks
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2`.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening
    // =========================================================================

    /// Open the repository rooted at `path`.
    ///
    /// Unlike `git` itself this does not search parent directories: `path`
    /// must be the worktree root (or its `.git` directory).
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `path` is not a repository
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|e| {
            log::debug!("open {} failed: {}", path.display(), e.message());
            GitError::NotARepo {
                path: path.to_path_buf(),
            }
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Path to the working directory.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// List every path whose staging or worktree state differs from HEAD.
    ///
    /// Untracked files are listed individually (untracked directories are
    /// recursed). Ignored files are skipped. The result is sorted by path.
    pub fn status(&self) -> Result<Vec<FileStatus>, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;

        let mut files: Vec<FileStatus> = statuses
            .iter()
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                FileStatus::from_git2(path, entry.status())
            })
            .filter(|file| !file.is_unmodified())
            .collect();

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    // =========================================================================
    // Staging
    // =========================================================================

    /// Stage a single path.
    ///
    /// - A directory stages everything beneath it.
    /// - A file is added to the index.
    /// - A path gone from disk but present in the index stages the deletion.
    ///
    /// # Errors
    ///
    /// - [`GitError::PathNotFound`] if the path is neither on disk nor tracked
    pub fn stage(&self, path: &str) -> Result<(), GitError> {
        let relative = self.relative_path(path)?;
        let full = self.work_dir()?.join(&relative);
        let mut index = self.repo.index()?;

        match std::fs::symlink_metadata(&full) {
            Ok(meta) if meta.is_dir() => {
                let spec = relative.to_string_lossy().into_owned();
                index.add_all([spec.as_str()], git2::IndexAddOption::DEFAULT, None)?;
                index.update_all([spec.as_str()], None)?;
            }
            Ok(_) => index.add_path(&relative)?,
            Err(_) if index.get_path(&relative, 0).is_some() => index.remove_path(&relative)?,
            Err(_) => {
                return Err(GitError::PathNotFound {
                    path: path.to_string(),
                })
            }
        }

        index.write()?;
        log::debug!("staged {}", relative.display());
        Ok(())
    }

    /// Stage everything in the worktree, including deletions.
    pub fn stage_all(&self) -> Result<(), GitError> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;
        Ok(())
    }

    /// Turn a user-supplied path into one relative to the worktree root.
    fn relative_path(&self, path: &str) -> Result<PathBuf, GitError> {
        let work_dir = self.work_dir()?;
        let given = Path::new(path);
        let stripped = if given.is_absolute() {
            given
                .strip_prefix(work_dir)
                .map_err(|_| GitError::PathNotFound {
                    path: path.to_string(),
                })?
        } else {
            given
        };

        let relative: PathBuf = stripped
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        if relative.as_os_str().is_empty() {
            return Err(GitError::PathNotFound {
                path: path.to_string(),
            });
        }
        Ok(relative)
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Commit the current index on the current branch.
    ///
    /// The identity is used for both author and committer, stamped with the
    /// current time. An unborn branch receives a root commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::NothingToCommit`] if the index tree equals HEAD's tree
    ///   (or is empty on an unborn branch)
    pub fn commit(&self, message: &str, identity: &Identity) -> Result<Oid, GitError> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(e.into()),
        };

        let unchanged = match &parent {
            Some(p) => p.tree_id() == tree_id,
            None => tree.is_empty(),
        };
        if unchanged {
            return Err(GitError::NothingToCommit);
        }

        let signature = git2::Signature::now(&identity.name, &identity.email)?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        log::debug!("created commit {}", oid);
        Ok(Oid::new(oid.to_string())?)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Walk history from HEAD, newest first.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if the current branch has no commits
    pub fn log(&self) -> Result<CommitIter<'_>, GitError> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        walk.push_head().map_err(|e| match e.code() {
            git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound => GitError::UnbornHead,
            _ => e.into(),
        })?;

        Ok(CommitIter {
            repo: &self.repo,
            walk,
        })
    }

    /// Name of the branch HEAD points at (works on an unborn branch).
    ///
    /// # Errors
    ///
    /// - [`GitError::DetachedHead`] if HEAD is not symbolic
    pub fn current_branch(&self) -> Result<String, GitError> {
        let head = self.repo.find_reference("HEAD")?;
        let target = head.symbolic_target().ok_or(GitError::DetachedHead)?;
        target
            .strip_prefix("refs/heads/")
            .map(str::to_string)
            .ok_or(GitError::DetachedHead)
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    fn find_remote(&self, name: &str) -> Result<git2::Remote<'_>, GitError> {
        self.repo.find_remote(name).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => GitError::RemoteNotFound {
                name: name.to_string(),
            },
            _ => e.into(),
        })
    }

    fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let mut branches = Vec::new();
        for entry in self.repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.get().name() {
                branches.push(name.to_string());
            }
        }
        Ok(branches)
    }

    /// Push local branches to `remote_name`.
    ///
    /// Every local branch is pushed to the same-named branch on the remote
    /// (no force). When every remote tip already matched the local one,
    /// [`SyncOutcome::AlreadyUpToDate`] is returned.
    ///
    /// # Errors
    ///
    /// - [`GitError::NonFastForward`] if a remote branch has commits the
    ///   local branch lacks
    /// - [`GitError::PushRejected`] if the remote refused an update
    pub fn push(&self, remote_name: &str) -> Result<SyncOutcome, GitError> {
        let mut remote = self.find_remote(remote_name)?;
        let refspecs: Vec<String> = self
            .local_branches()?
            .into_iter()
            .map(|name| format!("{name}:{name}"))
            .collect();

        if refspecs.is_empty() {
            log::debug!("push: no local branches");
            return Ok(SyncOutcome::AlreadyUpToDate);
        }
        log::debug!("push: {:?}", refspecs);

        let mut changed = 0usize;
        let mut rejected = Vec::new();
        {
            let mut callbacks = credential_callbacks(self.repo.config().ok());
            // `src` is the remote's current tip, `dst` the tip being sent.
            callbacks.push_negotiation(|updates| {
                changed = updates.iter().filter(|u| u.src() != u.dst()).count();
                Ok(())
            });
            callbacks.push_update_reference(|refname, status| {
                if let Some(message) = status {
                    rejected.push(format!("{refname}: {message}"));
                }
                Ok(())
            });
            let mut opts = git2::PushOptions::new();
            opts.remote_callbacks(callbacks);
            remote.push(&refspecs, Some(&mut opts))?;
        }

        if !rejected.is_empty() {
            return Err(GitError::PushRejected {
                details: rejected.join(", "),
            });
        }
        if changed == 0 {
            return Ok(SyncOutcome::AlreadyUpToDate);
        }
        Ok(SyncOutcome::Updated)
    }

    /// Fetch the current branch from `remote_name` and fast-forward to it.
    ///
    /// The worktree is updated with a safe checkout, so local modifications
    /// that would be overwritten abort the pull instead of being lost.
    ///
    /// # Errors
    ///
    /// - [`GitError::NonFastForward`] if local and remote history diverged
    pub fn pull(&self, remote_name: &str) -> Result<SyncOutcome, GitError> {
        let branch = self.current_branch()?;
        let mut remote = self.find_remote(remote_name)?;

        let refspec = format!("refs/heads/{branch}:refs/remotes/{remote_name}/{branch}");
        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(credential_callbacks(self.repo.config().ok()));
        remote.fetch(&[refspec.as_str()], Some(&mut fetch_opts), None)?;

        let fetch_head = self.repo.find_reference("FETCH_HEAD")?;
        let incoming = self.repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = self.repo.merge_analysis(&[&incoming])?;

        if analysis.is_up_to_date() {
            return Ok(SyncOutcome::AlreadyUpToDate);
        }
        if !(analysis.is_fast_forward() || analysis.is_unborn()) {
            return Err(GitError::NonFastForward);
        }

        let target = self.repo.find_commit(incoming.id())?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.safe();
        self.repo
            .checkout_tree(target.as_object(), Some(&mut checkout))?;

        let refname = format!("refs/heads/{branch}");
        let reflog = format!("pull: fast-forward to {}", incoming.id());
        match self.repo.find_reference(&refname) {
            Ok(mut reference) => {
                reference.set_target(incoming.id(), &reflog)?;
            }
            Err(_) => {
                self.repo.reference(&refname, incoming.id(), true, &reflog)?;
            }
        }
        self.repo.set_head(&refname)?;

        log::debug!("pull: {} now at {}", refname, incoming.id());
        Ok(SyncOutcome::Updated)
    }

    // =========================================================================
    // Clone
    // =========================================================================

    /// Clone `url` into `dest`, reporting transfer progress to `progress`.
    pub fn clone_into(
        url: &str,
        dest: &Path,
        progress: &dyn CloneProgress,
    ) -> Result<Self, GitError> {
        let mut callbacks = credential_callbacks(git2::Config::open_default().ok());
        callbacks.sideband_progress(|data| {
            progress.remote_message(data);
            true
        });
        callbacks.transfer_progress(|stats| {
            progress.transfer(
                stats.received_objects(),
                stats.total_objects(),
                stats.received_bytes(),
            );
            true
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let repo = git2::build::RepoBuilder::new()
            .fetch_options(fetch_opts)
            .clone(url, dest)?;

        Ok(Self { repo })
    }
}
