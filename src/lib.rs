//! git-cli - A lightweight git command line built on libgit2
//!
//! git-cli exposes a handful of everyday version-control commands (status,
//! add, commit, push, pull, log, clone) with Japanese-language output. All
//! version-control semantics are delegated to libgit2 through the `git2`
//! crate.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing, dispatch and the command handlers
//! - [`git`] - Single interface for all Git operations
//! - [`core`] - Domain types and configuration
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Only [`git`] imports `git2`
//! 2. Every command prints its result or a prefixed error to stdout
//! 3. Handler failures, missing arguments included, exit non-zero; help and
//!    unknown commands exit zero

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
