//! Test fixtures for common test scenarios.
//!
//! The reference project mirrors a typical app module: application id
//! `com.example.pavo_efectivo`, `minSdk = 23`, `targetSdk = compileSdk = 34`,
//! Java 17, and a release variant that borrows the debug identity.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use semver::Version;

use crate::core::manifest::MANIFEST_NAME;
use crate::core::profile::{CandidateProfile, ResolvedProfile, SdkLevels, ValidatedProfile};
use crate::core::provider::ProviderValues;
use crate::core::runtime::{JavaVersion, LanguageCompatibility};
use crate::core::settings::ExplicitSettings;
use crate::core::signing::{FallbackRules, SigningRegistry};
use crate::core::variant::BuildVariant;
use crate::core::ApplicationId;
use crate::resolver::signing::SigningSelector;

pub const APPLICATION_ID: &str = "com.example.pavo_efectivo";

/// Explicit settings of the reference project.
pub fn pavo_settings() -> ExplicitSettings {
    ExplicitSettings::new(APPLICATION_ID)
        .with_sdks(23, 34, 34)
        .with_compatibility(JavaVersion::JAVA_17, JavaVersion::JAVA_17)
}

/// Provider snapshot with only the always-present fields.
pub fn provider() -> ProviderValues {
    ProviderValues::new(1, "1.0.0", Version::new(26, 1, 10909125))
}

/// Candidate profile of the reference project.
pub fn candidate() -> CandidateProfile {
    let id = ApplicationId::parse(APPLICATION_ID).unwrap();
    CandidateProfile {
        application_id: id.clone(),
        namespace: id,
        sdk: SdkLevels {
            min_sdk: 23.into(),
            target_sdk: 34.into(),
            compile_sdk: 34.into(),
        },
        language: LanguageCompatibility {
            source_compatibility: JavaVersion::JAVA_17,
            target_compatibility: JavaVersion::JAVA_17,
            jvm_target: JavaVersion::JAVA_17,
        },
        ndk_version: Version::new(26, 1, 10909125),
        version_code: 1,
        version_name: "1.0.0".to_string(),
    }
}

/// Resolved profile of the reference project (debug + release variants).
pub fn resolved_profile() -> ResolvedProfile {
    let registry = SigningRegistry::with_platform_debug();
    let rules = FallbackRules::default();
    let variants = BuildVariant::defaults();
    let selections = SigningSelector::new(&registry, &rules)
        .select_all(&variants, |_| None)
        .unwrap();
    ResolvedProfile::assemble(ValidatedProfile::new(candidate()), &variants, selections)
}

/// Fixture for a project directory on disk.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// build-profile.toml content.
    pub manifest: String,
    /// Extra files (path relative to project root -> content).
    pub files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// The reference project with a `local.properties` provider snapshot.
    pub fn pavo() -> Self {
        let manifest = format!(
            r#"[android]
applicationId = "{APPLICATION_ID}"
compileSdk = 34
minSdk = 23
targetSdk = 34
sourceCompatibility = "VERSION_17"
targetCompatibility = "VERSION_17"

[provider]
path = "local.properties"
"#
        );

        ProjectFixture {
            manifest,
            files: BTreeMap::new(),
        }
        .with_file("local.properties", local_properties(1, "1.0.0"))
    }

    /// Replace the manifest.
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Add or replace a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write the fixture under `base_path`; returns the manifest path.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(base_path)?;
        let manifest_path = base_path.join(MANIFEST_NAME);
        std::fs::write(&manifest_path, &self.manifest)?;

        for (path, content) in &self.files {
            let full = base_path.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full, content)?;
        }

        Ok(manifest_path)
    }
}

/// A Flutter-style `local.properties` provider snapshot.
pub fn local_properties(version_code: u32, version_name: &str) -> String {
    format!(
        "flutter.sdk=/opt/flutter\n\
         flutter.versionCode={version_code}\n\
         flutter.versionName={version_name}\n\
         flutter.ndkVersion=26.1.10909125\n"
    )
}
