//! buildprofile - Build-configuration resolver for Android/Flutter app modules
//!
//! This crate merges a module's explicit build settings with values from an
//! upstream toolchain provider, validates the result against a platform
//! compatibility table, selects a signing identity for every build variant,
//! and serializes the resolved profile for the downstream build pipeline.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for buildprofile unit tests.
///
/// Only available when running tests. Provides the reference project
/// settings, provider snapshots, and on-disk project layouts.
#[cfg(test)]
pub mod test_support;

pub use core::{
    api_level::ApiLevel, application_id::ApplicationId, manifest::ProfileManifest,
    profile::ResolvedProfile, provider::ProviderValues, runtime::JavaVersion,
    settings::ExplicitSettings,
};

pub use resolver::{BuildProfileResolver, ProfileError};
pub use util::context::GlobalContext;
