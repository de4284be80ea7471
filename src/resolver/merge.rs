//! Profile merge: explicit settings over provider values.
//!
//! Merge policy:
//! - Explicit value wins when present
//! - Otherwise the provider value is used
//! - A required field with neither is a hard failure
//!
//! Derived defaults (`namespace` from `applicationId`, `jvmTarget` from
//! `targetCompatibility`) are applied after the merge of their source field.

use crate::core::application_id::ApplicationId;
use crate::core::profile::{CandidateProfile, SdkLevels};
use crate::core::provider::ProviderValues;
use crate::core::runtime::LanguageCompatibility;
use crate::core::settings::ExplicitSettings;
use crate::resolver::errors::ProfileError;

/// Merge explicit settings with a provider snapshot into a candidate profile.
///
/// Pure: no I/O, no logging beyond debug traces of which side won.
pub fn resolve(
    explicit: &ExplicitSettings,
    provider: &ProviderValues,
) -> Result<CandidateProfile, ProfileError> {
    let application_id = application_id_field(
        "applicationId",
        explicit
            .application_id
            .as_deref()
            .ok_or(ProfileError::MissingRequiredField {
                field: "applicationId",
            })?,
    )?;

    let namespace = match explicit.namespace.as_deref() {
        Some(ns) => application_id_field("namespace", ns)?,
        None => application_id.clone(),
    };

    let sdk = SdkLevels {
        min_sdk: required("minSdk", explicit.min_sdk, provider.min_sdk)?,
        target_sdk: required("targetSdk", explicit.target_sdk, provider.target_sdk)?,
        compile_sdk: required("compileSdk", explicit.compile_sdk, provider.compile_sdk)?,
    };

    let source_compatibility = required(
        "sourceCompatibility",
        explicit.source_compatibility,
        provider.java_version,
    )?;
    let target_compatibility = required(
        "targetCompatibility",
        explicit.target_compatibility,
        provider.java_version,
    )?;
    let jvm_target = explicit.jvm_target.unwrap_or(target_compatibility);

    let ndk_version = pick(
        "ndkVersion",
        explicit.ndk_version.clone(),
        provider.ndk_version.clone(),
    );
    let version_code = pick("versionCode", explicit.version_code, provider.version_code);
    let version_name = pick(
        "versionName",
        explicit.version_name.clone(),
        provider.version_name.clone(),
    );

    Ok(CandidateProfile {
        application_id,
        namespace,
        sdk,
        language: LanguageCompatibility {
            source_compatibility,
            target_compatibility,
            jvm_target,
        },
        ndk_version,
        version_code,
        version_name,
    })
}

fn application_id_field(field: &'static str, value: &str) -> Result<ApplicationId, ProfileError> {
    ApplicationId::parse(value).map_err(|_| ProfileError::InvalidApplicationId {
        field,
        value: value.to_string(),
    })
}

/// Explicit wins over an always-present provider value.
fn pick<T>(field: &'static str, explicit: Option<T>, provider: T) -> T {
    match explicit {
        Some(value) => {
            tracing::debug!("{}: using explicit value", field);
            value
        }
        None => {
            tracing::debug!("{}: using provider value", field);
            provider
        }
    }
}

/// Explicit wins over an optional provider value; neither is an error.
fn required<T>(
    field: &'static str,
    explicit: Option<T>,
    provider: Option<T>,
) -> Result<T, ProfileError> {
    if explicit.is_some() {
        tracing::debug!("{}: using explicit value", field);
    } else if provider.is_some() {
        tracing::debug!("{}: using provider value", field);
    }
    explicit
        .or(provider)
        .ok_or(ProfileError::MissingRequiredField { field })
}
