//! Shared fixtures for integration tests.
//!
//! Repositories are created with git2 directly so the tests do not depend on
//! a git binary being installed.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

use git_cli::git::{CommitInfo, Git, Identity};

/// Identity used for fixture commits.
pub fn test_identity() -> Identity {
    Identity::new("Test User", "test@example.com")
}

/// Newest commit reachable from HEAD.
pub fn latest_commit(git: &Git) -> CommitInfo {
    git.log()
        .expect("log failed")
        .next()
        .expect("no commits")
        .expect("unreadable commit")
}

/// A non-bare repository in a temporary directory, on branch `main`.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create an empty repository (unborn `main`).
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head("main");
        git2::Repository::init_opts(dir.path(), &opts).expect("failed to init repo");
        Self { dir }
    }

    /// Create a repository with one commit containing `README.md`.
    pub fn with_initial_commit() -> Self {
        let repo = Self::new();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a Git interface to this repository.
    pub fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Write a file relative to the worktree root, creating parent dirs.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Write, stage and commit a file. Returns the full commit id.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
        self.write(name, content);
        let git = self.git();
        git.stage(name).expect("stage failed");
        git.commit(message, &test_identity())
            .expect("commit failed")
            .to_string()
    }

    /// Create `count` commits, each touching its own file.
    pub fn commit_many(&self, count: usize) {
        for i in 0..count {
            self.commit_file(&format!("file{}.txt", i), "x\n", &format!("commit {}", i));
        }
    }

    /// Add a remote pointing at a local path.
    pub fn add_remote(&self, name: &str, target: &Path) {
        let repo = git2::Repository::open(self.path()).unwrap();
        repo.remote(name, target.to_str().unwrap()).unwrap();
    }

    /// HEAD commit id, or `None` on an unborn branch.
    pub fn head(&self) -> Option<String> {
        let repo = git2::Repository::open(self.path()).unwrap();
        let head = repo.head().ok()?;
        head.target().map(|oid| oid.to_string())
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let repo = git2::Repository::open(self.path()).unwrap();
        let mut walk = repo.revwalk().unwrap();
        if walk.push_head().is_err() {
            return 0;
        }
        walk.count()
    }
}

/// A bare repository acting as a remote, with HEAD on `main`.
pub struct BareRemote {
    dir: TempDir,
}

impl BareRemote {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut opts = git2::RepositoryInitOptions::new();
        opts.bare(true).initial_head("main");
        git2::Repository::init_opts(dir.path(), &opts).expect("failed to init bare repo");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        self.path().to_str().unwrap().to_string()
    }

    /// Tip of `refs/heads/<branch>` on the remote.
    pub fn branch_tip(&self, branch: &str) -> Option<String> {
        let repo = git2::Repository::open_bare(self.path()).unwrap();
        let reference = repo.find_reference(&format!("refs/heads/{}", branch)).ok()?;
        reference.target().map(|oid| oid.to_string())
    }
}

/// A scratch directory that is not a repository.
pub fn plain_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}
