//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, error prefixing and clone progress
//!
//! # Design
//!
//! All user-facing text passes through this module so quiet mode and the
//! error prefix are applied consistently.

pub mod output;
