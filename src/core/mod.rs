//! core
//!
//! Core domain types and configuration for git-cli.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod types;
