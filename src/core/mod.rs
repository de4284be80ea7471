//! Core data structures for buildprofile.
//!
//! This module contains the foundational types used throughout resolution:
//! - Platform values (API levels, Java versions, application ids)
//! - Inputs (explicit settings, provider snapshots, the manifest)
//! - Signing identities, variants, and the profile stages

pub mod api_level;
pub mod application_id;
pub mod manifest;
pub mod profile;
pub mod provider;
pub mod runtime;
pub mod settings;
pub mod signing;
pub mod variant;

pub use api_level::ApiLevel;
pub use application_id::ApplicationId;
pub use manifest::{find_manifest, ManifestError, ProfileManifest, MANIFEST_NAME};
pub use profile::{
    BindingSource, CandidateProfile, Resolution, ResolvedProfile, ResolvedVariant, SdkLevels,
    SigningFallback, SigningSelection, ValidatedProfile,
};
pub use provider::{FileProvider, ProviderValues, VersionProvider};
pub use runtime::{JavaVersion, LanguageCompatibility};
pub use settings::ExplicitSettings;
pub use signing::{FallbackRules, SigningIdentity, SigningRegistry};
pub use variant::BuildVariant;
