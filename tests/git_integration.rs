//! Integration tests for the Git interface.
//!
//! These tests use real repositories created in temporary directories to
//! verify that the Git interface works against libgit2.

mod common;

use std::cell::Cell;

use common::{latest_commit, plain_dir, test_identity, BareRemote, TestRepo};
use git_cli::git::{CloneProgress, FileState, Git, GitError, SyncOutcome};

/// Progress sink that only counts callbacks.
#[derive(Default)]
struct CountingProgress {
    transfers: Cell<usize>,
}

impl CloneProgress for CountingProgress {
    fn remote_message(&self, _message: &[u8]) {}

    fn transfer(&self, _received: usize, _total: usize, _bytes: usize) {
        self.transfers.set(self.transfers.get() + 1);
    }
}

// =============================================================================
// Repository Opening Tests
// =============================================================================

#[test]
fn open_valid_repository() {
    let repo = TestRepo::new();
    assert!(Git::open(repo.path()).is_ok());
}

#[test]
fn open_non_repository_fails() {
    let dir = plain_dir();
    let git = Git::open(dir.path());
    assert!(matches!(git, Err(GitError::NotARepo { .. })));
}

#[test]
fn open_does_not_search_parent_directories() {
    let repo = TestRepo::new();
    let subdir = repo.path().join("subdir");
    std::fs::create_dir(&subdir).unwrap();

    assert!(matches!(Git::open(&subdir), Err(GitError::NotARepo { .. })));
}

#[test]
fn open_bare_repository_fails() {
    let remote = BareRemote::new();
    assert!(matches!(Git::open(remote.path()), Err(GitError::BareRepo)));
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn status_clean_after_commit() {
    let repo = TestRepo::with_initial_commit();
    assert!(repo.git().status().unwrap().is_empty());
}

#[test]
fn status_untracked_file() {
    let repo = TestRepo::with_initial_commit();
    repo.write("a.txt", "hello\n");

    let files = repo.git().status().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "a.txt");
    assert_eq!(files[0].staging, FileState::Untracked);
    assert_eq!(files[0].worktree, FileState::Untracked);
}

#[test]
fn status_lists_nested_untracked_files_sorted() {
    let repo = TestRepo::new();
    repo.write("dir/z.txt", "z");
    repo.write("dir/a.txt", "a");
    repo.write("b.txt", "b");

    let paths: Vec<_> = repo
        .git()
        .status()
        .unwrap()
        .into_iter()
        .map(|f| f.path)
        .collect();
    assert_eq!(paths, vec!["b.txt", "dir/a.txt", "dir/z.txt"]);
}

#[test]
fn status_ignores_gitignored_files() {
    let repo = TestRepo::new();
    repo.commit_file(".gitignore", "*.log\n", "ignore logs");
    repo.write("debug.log", "noise");

    assert!(repo.git().status().unwrap().is_empty());
}

#[test]
fn status_tracks_modifications_and_deletions() {
    let repo = TestRepo::with_initial_commit();
    repo.commit_file("keep.txt", "v1\n", "add keep");
    repo.write("README.md", "changed\n");
    std::fs::remove_file(repo.path().join("keep.txt")).unwrap();

    let files = repo.git().status().unwrap();
    assert_eq!(files.len(), 2);

    let keep = files.iter().find(|f| f.path == "keep.txt").unwrap();
    assert_eq!(keep.staging, FileState::Unmodified);
    assert_eq!(keep.worktree, FileState::Deleted);

    let readme = files.iter().find(|f| f.path == "README.md").unwrap();
    assert_eq!(readme.staging, FileState::Unmodified);
    assert_eq!(readme.worktree, FileState::Modified);
}

// =============================================================================
// Staging Tests
// =============================================================================

#[test]
fn stage_new_file() {
    let repo = TestRepo::with_initial_commit();
    repo.write("a.txt", "hello\n");
    let git = repo.git();

    git.stage("a.txt").unwrap();

    let files = git.status().unwrap();
    assert_eq!(files[0].staging, FileState::Added);
    assert_eq!(files[0].worktree, FileState::Unmodified);
}

#[test]
fn stage_accepts_dot_slash_prefix() {
    let repo = TestRepo::with_initial_commit();
    repo.write("a.txt", "hello\n");
    let git = repo.git();

    git.stage("./a.txt").unwrap();
    assert_eq!(git.status().unwrap()[0].staging, FileState::Added);
}

#[test]
fn stage_modified_file() {
    let repo = TestRepo::with_initial_commit();
    repo.write("README.md", "changed\n");
    let git = repo.git();

    git.stage("README.md").unwrap();
    assert_eq!(git.status().unwrap()[0].staging, FileState::Modified);
}

#[test]
fn stage_deleted_file() {
    let repo = TestRepo::with_initial_commit();
    std::fs::remove_file(repo.path().join("README.md")).unwrap();
    let git = repo.git();

    git.stage("README.md").unwrap();

    let files = git.status().unwrap();
    assert_eq!(files[0].staging, FileState::Deleted);
    assert_eq!(files[0].worktree, FileState::Unmodified);
}

#[test]
fn stage_missing_path_fails() {
    let repo = TestRepo::with_initial_commit();
    let result = repo.git().stage("nope.txt");
    assert!(matches!(result, Err(GitError::PathNotFound { .. })));
}

#[test]
fn stage_directory() {
    let repo = TestRepo::with_initial_commit();
    repo.write("src/a.rs", "a");
    repo.write("src/nested/b.rs", "b");
    repo.write("other.txt", "o");
    let git = repo.git();

    git.stage("src").unwrap();

    let files = git.status().unwrap();
    let staged: Vec<_> = files
        .iter()
        .filter(|f| f.staging == FileState::Added)
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(staged, vec!["src/a.rs", "src/nested/b.rs"]);
    let other = files.iter().find(|f| f.path == "other.txt").unwrap();
    assert_eq!(other.staging, FileState::Untracked);
}

#[test]
fn stage_all_includes_new_and_deleted() {
    let repo = TestRepo::with_initial_commit();
    repo.write("a.txt", "a");
    repo.write("dir/b.txt", "b");
    std::fs::remove_file(repo.path().join("README.md")).unwrap();
    let git = repo.git();

    git.stage_all().unwrap();

    let files = git.status().unwrap();
    assert_eq!(files.len(), 3);
    for file in &files {
        assert_eq!(file.worktree, FileState::Unmodified, "{}", file.path);
    }
    let readme = files.iter().find(|f| f.path == "README.md").unwrap();
    assert_eq!(readme.staging, FileState::Deleted);
}

// =============================================================================
// Commit Tests
// =============================================================================

#[test]
fn root_commit_on_unborn_branch() {
    let repo = TestRepo::new();
    repo.write("a.txt", "a");
    let git = repo.git();
    git.stage("a.txt").unwrap();

    let oid = git.commit("first", &test_identity()).unwrap();

    assert_eq!(repo.head(), Some(oid.to_string()));
    assert_eq!(repo.commit_count(), 1);
    assert!(git.status().unwrap().is_empty());
}

#[test]
fn commit_records_identity_and_message() {
    let repo = TestRepo::with_initial_commit();
    repo.write("a.txt", "a");
    let git = repo.git();
    git.stage("a.txt").unwrap();

    let oid = git.commit("add a\n\nlonger body", &test_identity()).unwrap();
    let head = latest_commit(&git);

    assert_eq!(head.oid, oid);
    assert_eq!(head.summary, "add a");
    assert_eq!(head.author_name, "Test User");
    assert_eq!(head.author_email, "test@example.com");
    assert_eq!(repo.commit_count(), 2);
}

#[test]
fn commit_without_changes_fails() {
    let repo = TestRepo::with_initial_commit();
    let result = repo.git().commit("nothing", &test_identity());
    assert!(matches!(result, Err(GitError::NothingToCommit)));
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn commit_on_empty_unborn_branch_fails() {
    let repo = TestRepo::new();
    let result = repo.git().commit("nothing", &test_identity());
    assert!(matches!(result, Err(GitError::NothingToCommit)));
}

#[test]
fn current_branch_on_unborn_repo() {
    let repo = TestRepo::new();
    assert_eq!(repo.git().current_branch().unwrap(), "main");
}

// =============================================================================
// Log Tests
// =============================================================================

#[test]
fn log_is_newest_first() {
    let repo = TestRepo::new();
    repo.commit_many(3);

    let summaries: Vec<_> = repo
        .git()
        .log()
        .unwrap()
        .map(|c| c.unwrap().summary)
        .collect();
    assert_eq!(summaries, vec!["commit 2", "commit 1", "commit 0"]);
}

#[test]
fn log_take_bounds_iteration() {
    let repo = TestRepo::new();
    repo.commit_many(5);

    assert_eq!(repo.git().log().unwrap().take(2).count(), 2);
    assert_eq!(repo.git().log().unwrap().take(10).count(), 5);
}

#[test]
fn log_on_unborn_branch_fails() {
    let repo = TestRepo::new();
    assert!(matches!(repo.git().log(), Err(GitError::UnbornHead)));
}

// =============================================================================
// Remote Tests (local bare repository as remote)
// =============================================================================

#[test]
fn push_then_push_again_is_up_to_date() {
    let repo = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    repo.add_remote("origin", remote.path());
    let git = repo.git();

    assert_eq!(git.push("origin").unwrap(), SyncOutcome::Updated);
    assert_eq!(remote.branch_tip("main"), repo.head());

    assert_eq!(git.push("origin").unwrap(), SyncOutcome::AlreadyUpToDate);
}

#[test]
fn push_sends_new_commits() {
    let repo = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    repo.add_remote("origin", remote.path());
    let git = repo.git();
    git.push("origin").unwrap();

    repo.commit_file("a.txt", "a", "second");

    assert_eq!(git.push("origin").unwrap(), SyncOutcome::Updated);
    assert_eq!(remote.branch_tip("main"), repo.head());
}

#[test]
fn first_push_to_empty_remote_creates_branch() {
    let repo = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    repo.add_remote("origin", remote.path());
    assert_eq!(remote.branch_tip("main"), None);

    assert_eq!(repo.git().push("origin").unwrap(), SyncOutcome::Updated);
    assert_eq!(remote.branch_tip("main"), repo.head());
}

#[test]
fn push_refuses_diverged_history() {
    let upstream = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    upstream.add_remote("origin", remote.path());
    upstream.git().push("origin").unwrap();

    let dest = plain_dir();
    let clone_path = dest.path().join("clone");
    let clone = Git::clone_into(&remote.url(), &clone_path, &CountingProgress::default())
        .unwrap();

    upstream.commit_file("up.txt", "up", "upstream side");
    upstream.git().push("origin").unwrap();

    std::fs::write(clone_path.join("local.txt"), "local").unwrap();
    clone.stage("local.txt").unwrap();
    clone.commit("local side", &test_identity()).unwrap();

    let result = clone.push("origin");
    assert!(
        matches!(
            result,
            Err(GitError::NonFastForward) | Err(GitError::PushRejected { .. })
        ),
        "unexpected push result: {:?}",
        result
    );
    assert_eq!(remote.branch_tip("main"), upstream.head());
}

#[test]
fn push_to_missing_remote_fails() {
    let repo = TestRepo::with_initial_commit();
    let result = repo.git().push("origin");
    assert!(matches!(result, Err(GitError::RemoteNotFound { .. })));
}

#[test]
fn pull_fast_forwards_clone() {
    let upstream = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    upstream.add_remote("origin", remote.path());
    upstream.git().push("origin").unwrap();

    let dest = plain_dir();
    let clone_path = dest.path().join("clone");
    let clone = Git::clone_into(&remote.url(), &clone_path, &CountingProgress::default())
        .unwrap();

    assert_eq!(clone.pull("origin").unwrap(), SyncOutcome::AlreadyUpToDate);

    upstream.commit_file("new.txt", "fresh\n", "upstream change");
    upstream.git().push("origin").unwrap();

    assert_eq!(clone.pull("origin").unwrap(), SyncOutcome::Updated);
    assert_eq!(
        std::fs::read_to_string(clone_path.join("new.txt")).unwrap(),
        "fresh\n"
    );
    assert_eq!(latest_commit(&clone).summary, "upstream change");
    assert!(clone.status().unwrap().is_empty());
}

#[test]
fn pull_into_unborn_branch() {
    let upstream = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    upstream.add_remote("origin", remote.path());
    upstream.git().push("origin").unwrap();

    let local = TestRepo::new();
    local.add_remote("origin", remote.path());

    assert_eq!(local.git().pull("origin").unwrap(), SyncOutcome::Updated);
    assert_eq!(local.head(), upstream.head());
    assert!(local.path().join("README.md").exists());
}

#[test]
fn pull_refuses_diverged_history() {
    let upstream = TestRepo::with_initial_commit();
    let remote = BareRemote::new();
    upstream.add_remote("origin", remote.path());
    upstream.git().push("origin").unwrap();

    let dest = plain_dir();
    let clone_path = dest.path().join("clone");
    let clone = Git::clone_into(&remote.url(), &clone_path, &CountingProgress::default())
        .unwrap();

    upstream.commit_file("up.txt", "up", "upstream side");
    upstream.git().push("origin").unwrap();

    std::fs::write(clone_path.join("local.txt"), "local").unwrap();
    clone.stage("local.txt").unwrap();
    clone.commit("local side", &test_identity()).unwrap();

    assert!(matches!(clone.pull("origin"), Err(GitError::NonFastForward)));
}

// =============================================================================
// Clone Tests
// =============================================================================

#[test]
fn clone_checks_out_files_and_history() {
    let upstream = TestRepo::with_initial_commit();
    upstream.commit_many(3);
    let remote = BareRemote::new();
    upstream.add_remote("origin", remote.path());
    upstream.git().push("origin").unwrap();

    let dest = plain_dir();
    let target = dest.path().join("copy");
    let progress = CountingProgress::default();

    let git = Git::clone_into(&remote.url(), &target, &progress).unwrap();

    assert!(target.join("README.md").exists());
    assert_eq!(git.log().unwrap().count(), 4);
}

#[test]
fn clone_of_missing_source_fails() {
    let dest = plain_dir();
    let missing = dest.path().join("does-not-exist");
    let result = Git::clone_into(
        missing.to_str().unwrap(),
        &dest.path().join("copy"),
        &CountingProgress::default(),
    );
    assert!(result.is_err());
}
