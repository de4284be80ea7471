//! Profile stages: candidate, validated, resolved.
//!
//! A profile moves through three shapes:
//! 1. `CandidateProfile` - every field merged, nothing checked
//! 2. `ValidatedProfile` - candidate that passed every compatibility check
//! 3. `ResolvedProfile` - validated profile plus per-variant signing
//!
//! Only the validator can construct a `ValidatedProfile`, and a
//! `ResolvedProfile` can only be assembled from one, so an emitted profile
//! always satisfies `minSdk <= targetSdk <= compileSdk`.

use std::collections::BTreeMap;
use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::api_level::ApiLevel;
use crate::core::application_id::ApplicationId;
use crate::core::runtime::LanguageCompatibility;
use crate::core::signing::SigningIdentity;
use crate::core::variant::BuildVariant;

/// The three SDK levels of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkLevels {
    pub min_sdk: ApiLevel,
    pub target_sdk: ApiLevel,
    pub compile_sdk: ApiLevel,
}

/// Merged but unchecked build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub application_id: ApplicationId,
    pub namespace: ApplicationId,
    pub sdk: SdkLevels,
    pub language: LanguageCompatibility,
    pub ndk_version: Version,
    pub version_code: u32,
    pub version_name: String,
}

/// A candidate profile that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfile {
    candidate: CandidateProfile,
}

impl ValidatedProfile {
    pub(crate) fn new(candidate: CandidateProfile) -> Self {
        ValidatedProfile { candidate }
    }

    /// Borrow the validated settings.
    pub fn candidate(&self) -> &CandidateProfile {
        &self.candidate
    }
}

/// How a variant's signing identity was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSource {
    /// Named by the project's explicit signing binding
    Explicit,
    /// Registry identity named after the variant
    Dedicated,
    /// Borrowed through a fallback rule
    Fallback,
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingSource::Explicit => write!(f, "explicit"),
            BindingSource::Dedicated => write!(f, "dedicated"),
            BindingSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A fallback signing resolution, surfaced as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningFallback {
    /// Variant that fell back
    pub variant: String,

    /// Identity it borrowed
    pub identity: String,

    /// Explicit binding that named an identity missing from the registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_binding: Option<String>,

    /// The registry held an identity named after the variant, but the
    /// explicit binding took precedence over it
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bypassed_dedicated: bool,
}

impl fmt::Display for SigningFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unknown_binding {
            Some(unknown) => write!(
                f,
                "variant `{}` is bound to unknown signing identity `{}`, falling back to `{}`",
                self.variant, unknown, self.identity
            )?,
            None => write!(
                f,
                "variant `{}` has no dedicated signing identity, falling back to `{}`",
                self.variant, self.identity
            )?,
        }
        if self.bypassed_dedicated {
            write!(
                f,
                " (dedicated identity `{}` was not used because of the explicit binding)",
                self.variant
            )?;
        }
        Ok(())
    }
}

/// Result of selecting a signing identity for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningSelection {
    pub variant: String,
    pub identity: SigningIdentity,
    pub source: BindingSource,
    pub fallback: Option<SigningFallback>,
}

/// A fully resolved variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariant {
    pub debuggable: bool,
    pub minify: bool,
    pub signing_source: BindingSource,
    pub signing: SigningIdentity,
}

/// The final, validated, immutable build profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProfile {
    pub application_id: ApplicationId,
    pub namespace: ApplicationId,
    #[serde(flatten)]
    pub sdk: SdkLevels,
    #[serde(flatten)]
    pub language: LanguageCompatibility,
    pub ndk_version: Version,
    pub version_code: u32,
    pub version_name: String,
    pub variants: BTreeMap<String, ResolvedVariant>,
}

impl ResolvedProfile {
    /// Combine a validated profile with per-variant signing selections.
    ///
    /// `variants` and `selections` are paired by position.
    pub fn assemble(
        validated: ValidatedProfile,
        variants: &[BuildVariant],
        selections: Vec<SigningSelection>,
    ) -> Self {
        let CandidateProfile {
            application_id,
            namespace,
            sdk,
            language,
            ndk_version,
            version_code,
            version_name,
        } = validated.candidate;

        let variants = variants
            .iter()
            .zip(selections)
            .map(|(variant, selection)| {
                (
                    variant.name.clone(),
                    ResolvedVariant {
                        debuggable: variant.debuggable,
                        minify: variant.minify,
                        signing_source: selection.source,
                        signing: selection.identity,
                    },
                )
            })
            .collect();

        ResolvedProfile {
            application_id,
            namespace,
            sdk,
            language,
            ndk_version,
            version_code,
            version_name,
            variants,
        }
    }

    /// Get a resolved variant by name.
    pub fn variant(&self, name: &str) -> Option<&ResolvedVariant> {
        self.variants.get(name)
    }
}

/// A successful resolution together with its non-fatal warnings.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub profile: ResolvedProfile,
    pub warnings: Vec<SigningFallback>,
}

impl Resolution {
    /// Whether any variant was signed through a fallback rule.
    pub fn has_fallbacks(&self) -> bool {
        !self.warnings.is_empty()
    }
}
