//! Test utilities for buildprofile unit tests.
//!
//! Provides ready-made settings, provider snapshots and profiles, plus a
//! project fixture that writes a manifest and provider file to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::fixtures::{pavo_settings, provider};
//!
//! #[test]
//! fn test_example() {
//!     let candidate = merge::resolve(&pavo_settings(), &provider()).unwrap();
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
