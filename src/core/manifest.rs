//! build-profile.toml manifest parsing.
//!
//! The manifest is where a project pins its explicit settings, declares its
//! variants and signing identities, and points at the provider snapshot.
//!
//! ```toml
//! [android]
//! applicationId = "com.example.app"
//! compileSdk = 34
//! minSdk = 23
//! targetSdk = 34
//!
//! [android.signing]
//! release = "upload"
//!
//! [provider]
//! path = "local.properties"
//!
//! [variants.profile]
//! debuggable = false
//!
//! [signing-configs.upload]
//! store-file = "keys/upload.jks"
//! key-alias = "upload"
//!
//! [signing-fallbacks]
//! staging = "debug"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::core::settings::ExplicitSettings;
use crate::core::signing::{
    FallbackRules, SigningConfigSpec, SigningIdentity, SigningRegistry, DEBUG_IDENTITY,
};
use crate::core::variant::{BuildVariant, VariantSpec};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "build-profile.toml";

/// Errors locating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `{}` in `{}` or any parent directory", MANIFEST_NAME, dir.display())]
    NotFound { dir: PathBuf },

    #[error("manifest `{}` does not exist", path.display())]
    Missing { path: PathBuf },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    android: ExplicitSettings,

    #[serde(default)]
    provider: Option<ProviderSection>,

    #[serde(default)]
    variants: Option<BTreeMap<String, VariantSpec>>,

    #[serde(default)]
    signing_configs: BTreeMap<String, SigningConfigSpec>,

    #[serde(default)]
    signing_fallbacks: Option<FallbackRules>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderSection {
    path: PathBuf,
}

/// A parsed build-profile.toml.
#[derive(Debug, Clone)]
pub struct ProfileManifest {
    /// Path of the manifest file
    path: PathBuf,

    /// Explicit settings from `[android]`
    pub settings: ExplicitSettings,

    /// Provider snapshot path, resolved against the manifest directory
    pub provider_path: Option<PathBuf>,

    /// Declared variants, sorted by name
    pub variants: Vec<BuildVariant>,

    /// Known signing identities
    pub registry: SigningRegistry,

    /// Fallback rules (defaults overlaid with `[signing-fallbacks]`)
    pub fallbacks: FallbackRules,
}

impl ProfileManifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&contents, root)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
            .map(|mut manifest| {
                manifest.path = path.to_path_buf();
                manifest
            })
    }

    /// Parse manifest contents; relative paths resolve against `root`.
    pub fn parse(contents: &str, root: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(contents)?;

        let variants = match raw.variants {
            Some(specs) if !specs.is_empty() => specs
                .iter()
                .map(|(name, spec)| BuildVariant::from_spec(name, spec))
                .collect(),
            _ => BuildVariant::defaults(),
        };

        // The platform always provides a debug identity unless the project
        // declares its own.
        let mut registry = SigningRegistry::new();
        if !raw.signing_configs.contains_key(DEBUG_IDENTITY) {
            registry.insert(SigningIdentity::platform_debug());
        }
        for (name, spec) in raw.signing_configs {
            let identity = spec.into_identity(&name);
            registry.insert(identity);
        }

        let mut fallbacks = FallbackRules::default();
        if let Some(custom) = raw.signing_fallbacks {
            fallbacks.merge(custom);
        }

        let provider_path = raw.provider.map(|p| {
            if p.path.is_absolute() {
                p.path
            } else {
                root.join(p.path)
            }
        });

        Ok(ProfileManifest {
            path: root.join(MANIFEST_NAME),
            settings: raw.android,
            provider_path,
            variants,
            registry,
            fallbacks,
        })
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Find a manifest in `start` or any of its ancestors.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ManifestError::NotFound {
            dir: start.to_path_buf(),
        })
}
