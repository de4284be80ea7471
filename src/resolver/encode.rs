//! Profile encoding and decoding.
//!
//! The serialized profile is the boundary with the downstream build
//! pipeline. Encoding is deterministic: struct fields serialize in
//! declaration order and variants are keyed by name in a sorted map, so the
//! same profile always produces the same bytes.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::profile::ResolvedProfile;
use crate::resolver::compat::TABLE_VERSION;
use crate::resolver::errors::ProfileError;
use crate::util::hash::sha256_str;

/// Version of the serialized document layout.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Largest version code the downstream store accepts.
pub const MAX_VERSION_CODE: u32 = 2_100_000_000;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitFormat {
    #[default]
    Json,
    Toml,
}

impl EmitFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            EmitFormat::Json => "json",
            EmitFormat::Toml => "toml",
        }
    }
}

impl fmt::Display for EmitFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for EmitFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(EmitFormat::Json),
            "toml" => Ok(EmitFormat::Toml),
            other => Err(format!("unknown format '{}', valid values: json, toml", other)),
        }
    }
}

/// Document wrapper written to the pipeline boundary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDocument {
    schema_version: u32,
    table_version: u32,
    profile: ResolvedProfile,
}

/// A serialized profile ready to hand to the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedProfile {
    format: EmitFormat,
    contents: String,
}

impl SerializedProfile {
    pub fn format(&self) -> EmitFormat {
        self.format
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    /// SHA-256 of the serialized bytes.
    pub fn fingerprint(&self) -> String {
        sha256_str(&self.contents)
    }

    /// Decode back into the profile it was emitted from.
    pub fn decode(&self) -> Result<ResolvedProfile> {
        decode(&self.contents, self.format)
    }
}

/// Serialize a resolved profile.
///
/// Fails only when the downstream schema cannot hold a resolved value,
/// which indicates schema drift rather than a user error.
pub fn emit(profile: &ResolvedProfile, format: EmitFormat) -> Result<SerializedProfile, ProfileError> {
    if profile.version_code > MAX_VERSION_CODE {
        return Err(ProfileError::UnrepresentableValue {
            field: "versionCode",
            value: profile.version_code.to_string(),
            reason: format!("the pipeline accepts version codes up to {}", MAX_VERSION_CODE),
        });
    }

    let document = ProfileDocument {
        schema_version: PROFILE_SCHEMA_VERSION,
        table_version: TABLE_VERSION,
        profile: profile.clone(),
    };

    let unrepresentable = |reason: String| ProfileError::UnrepresentableValue {
        field: "profile",
        value: profile.application_id.to_string(),
        reason,
    };

    let contents = match format {
        EmitFormat::Json => serde_json::to_string_pretty(&document)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| unrepresentable(e.to_string()))?,
        EmitFormat::Toml => {
            toml::to_string(&document).map_err(|e| unrepresentable(e.to_string()))?
        }
    };

    Ok(SerializedProfile { format, contents })
}

/// Parse a serialized profile.
pub fn decode(contents: &str, format: EmitFormat) -> Result<ResolvedProfile> {
    let document: ProfileDocument = match format {
        EmitFormat::Json => {
            serde_json::from_str(contents).context("failed to parse JSON profile")?
        }
        EmitFormat::Toml => toml::from_str(contents).context("failed to parse TOML profile")?,
    };

    if document.schema_version != PROFILE_SCHEMA_VERSION {
        bail!(
            "unsupported profile schema version {} (expected {})",
            document.schema_version,
            PROFILE_SCHEMA_VERSION
        );
    }

    let sdk = &document.profile.sdk;
    if !(sdk.min_sdk <= sdk.target_sdk && sdk.target_sdk <= sdk.compile_sdk) {
        bail!(
            "profile violates minSdk <= targetSdk <= compileSdk (minSdk {}, targetSdk {}, compileSdk {})",
            sdk.min_sdk,
            sdk.target_sdk,
            sdk.compile_sdk
        );
    }

    Ok(document.profile)
}
