//! Explicit project settings.
//!
//! These are the values a project pins in the `[android]` table of its
//! manifest. Every field is optional; unset fields fall back to the
//! provider during resolution.

use std::collections::BTreeMap;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::api_level::ApiLevel;
use crate::core::runtime::JavaVersion;

/// Explicit build settings supplied by the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExplicitSettings {
    /// Application identifier (required, no provider default)
    #[serde(default)]
    pub application_id: Option<String>,

    /// Code namespace (defaults to the application id)
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub min_sdk: Option<ApiLevel>,

    #[serde(default)]
    pub target_sdk: Option<ApiLevel>,

    #[serde(default)]
    pub compile_sdk: Option<ApiLevel>,

    #[serde(default)]
    pub source_compatibility: Option<JavaVersion>,

    #[serde(default)]
    pub target_compatibility: Option<JavaVersion>,

    /// Kotlin bytecode target (defaults to the target compatibility)
    #[serde(default)]
    pub jvm_target: Option<JavaVersion>,

    /// Native toolkit (NDK) version override
    #[serde(default)]
    pub ndk_version: Option<Version>,

    #[serde(default)]
    pub version_code: Option<u32>,

    #[serde(default)]
    pub version_name: Option<String>,

    /// Explicit signing bindings: variant name -> signing identity name
    #[serde(default)]
    pub signing: BTreeMap<String, String>,
}

impl ExplicitSettings {
    /// Create settings with only the application id set.
    pub fn new(application_id: impl Into<String>) -> Self {
        ExplicitSettings {
            application_id: Some(application_id.into()),
            ..Default::default()
        }
    }

    /// Set all three SDK levels at once.
    pub fn with_sdks(mut self, min: u32, target: u32, compile: u32) -> Self {
        self.min_sdk = Some(ApiLevel::new(min));
        self.target_sdk = Some(ApiLevel::new(target));
        self.compile_sdk = Some(ApiLevel::new(compile));
        self
    }

    /// Set source and target compatibility.
    pub fn with_compatibility(mut self, source: JavaVersion, target: JavaVersion) -> Self {
        self.source_compatibility = Some(source);
        self.target_compatibility = Some(target);
        self
    }

    /// Bind a variant to a signing identity.
    pub fn with_signing(mut self, variant: impl Into<String>, identity: impl Into<String>) -> Self {
        self.signing.insert(variant.into(), identity.into());
        self
    }

    /// Get the explicit signing binding for a variant, if any.
    pub fn signing_for(&self, variant: &str) -> Option<&str> {
        self.signing.get(variant).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_android_table() {
        let settings: ExplicitSettings = toml::from_str(
            r#"
applicationId = "com.example.pavo_efectivo"
compileSdk = 34
minSdk = 23
targetSdk = 34
sourceCompatibility = "VERSION_17"
targetCompatibility = 17

[signing]
release = "debug"
"#,
        )
        .unwrap();

        assert_eq!(settings.application_id.as_deref(), Some("com.example.pavo_efectivo"));
        assert_eq!(settings.compile_sdk, Some(ApiLevel::new(34)));
        assert_eq!(settings.source_compatibility, Some(JavaVersion::JAVA_17));
        assert_eq!(settings.target_compatibility, Some(JavaVersion::JAVA_17));
        assert!(settings.jvm_target.is_none());
        assert_eq!(settings.signing_for("release"), Some("debug"));
        assert_eq!(settings.signing_for("debug"), None);
    }

    #[test]
    fn test_legacy_java_level_as_float() {
        let settings: ExplicitSettings =
            toml::from_str("sourceCompatibility = 1.8\ntargetCompatibility = 1.8").unwrap();
        assert_eq!(settings.source_compatibility, Some(JavaVersion::JAVA_8));
        assert_eq!(settings.target_compatibility, Some(JavaVersion::JAVA_8));
    }

    #[test]
    fn test_unset_fields_stay_none() {
        let settings: ExplicitSettings = toml::from_str("applicationId = \"com.example\"").unwrap();
        assert!(settings.min_sdk.is_none());
        assert!(settings.ndk_version.is_none());
        assert!(settings.signing.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = toml::from_str::<ExplicitSettings>("applicationId = \"a.b\"\nminSDK = 21");
        assert!(result.is_err());
    }

    #[test]
    fn test_ndk_version_parses_as_semver() {
        let settings: ExplicitSettings =
            toml::from_str("ndkVersion = \"26.1.10909125\"").unwrap();
        assert_eq!(settings.ndk_version, Some(Version::new(26, 1, 10909125)));
    }
}
