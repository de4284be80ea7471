//! High-level operations.
//!
//! This module contains the implementation of buildprofile commands.

pub mod resolve;
pub mod table;

pub use resolve::{check_project, resolve_project, ResolveOptions, ResolveOutcome};
pub use table::format_table;
