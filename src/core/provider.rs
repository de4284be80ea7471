//! Upstream version provider.
//!
//! The provider is the toolchain/framework layer that owns default version
//! metadata (version code and name, NDK version and, optionally, default SDK
//! levels). It is injected into resolution as a read-only snapshot so the
//! resolver can be exercised with synthetic values.
//!
//! Two on-disk snapshot shapes are supported:
//! - TOML, using the boundary field names (`toolchainVersionCode`, ...)
//! - Flutter-style `local.properties` (`flutter.versionCode=...`)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::api_level::ApiLevel;
use crate::core::runtime::JavaVersion;

/// A snapshot of provider-supplied values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderValues {
    /// Monotonic build number computed upstream
    #[serde(rename = "toolchainVersionCode")]
    pub version_code: u32,

    /// Human-readable version computed upstream
    #[serde(rename = "toolchainVersionName")]
    pub version_name: String,

    /// Native toolkit (NDK) version
    #[serde(rename = "nativeToolkitVersion")]
    pub ndk_version: Version,

    #[serde(rename = "compileSdkVersion", default)]
    pub compile_sdk: Option<ApiLevel>,

    #[serde(rename = "minSdkVersion", default)]
    pub min_sdk: Option<ApiLevel>,

    #[serde(rename = "targetSdkVersion", default)]
    pub target_sdk: Option<ApiLevel>,

    /// Default Java version for source/target compatibility
    #[serde(rename = "javaVersion", default)]
    pub java_version: Option<JavaVersion>,
}

impl ProviderValues {
    /// Create a snapshot with only the always-present fields.
    pub fn new(version_code: u32, version_name: impl Into<String>, ndk_version: Version) -> Self {
        ProviderValues {
            version_code,
            version_name: version_name.into(),
            ndk_version,
            compile_sdk: None,
            min_sdk: None,
            target_sdk: None,
            java_version: None,
        }
    }

    /// Set the provider's default SDK levels.
    pub fn with_sdks(mut self, min: u32, target: u32, compile: u32) -> Self {
        self.min_sdk = Some(ApiLevel::new(min));
        self.target_sdk = Some(ApiLevel::new(target));
        self.compile_sdk = Some(ApiLevel::new(compile));
        self
    }

    /// Set the provider's default Java version.
    pub fn with_java(mut self, version: JavaVersion) -> Self {
        self.java_version = Some(version);
        self
    }

    /// Parse a TOML snapshot.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse provider snapshot")
    }

    /// Parse a Flutter-style `local.properties` snapshot.
    pub fn from_properties(contents: &str) -> Result<Self> {
        let props = parse_properties(contents);

        let required = |key: &str| -> Result<&String> {
            props
                .get(key)
                .ok_or_else(|| anyhow!("provider snapshot is missing `{}`", key))
        };

        let version_code = required("flutter.versionCode")?
            .parse::<u32>()
            .context("`flutter.versionCode` is not a valid version code")?;
        let version_name = required("flutter.versionName")?.clone();
        let ndk_version = Version::parse(required("flutter.ndkVersion")?)
            .context("`flutter.ndkVersion` is not a valid version")?;

        let api_level = |key: &str| -> Result<Option<ApiLevel>> {
            props
                .get(key)
                .map(|v| v.parse::<ApiLevel>().with_context(|| format!("invalid `{}`", key)))
                .transpose()
        };

        let java_version = props
            .get("flutter.javaVersion")
            .map(|v| v.parse::<JavaVersion>().context("invalid `flutter.javaVersion`"))
            .transpose()?;

        Ok(ProviderValues {
            version_code,
            version_name,
            ndk_version,
            compile_sdk: api_level("flutter.compileSdkVersion")?,
            min_sdk: api_level("flutter.minSdkVersion")?,
            target_sdk: api_level("flutter.targetSdkVersion")?,
            java_version,
        })
    }
}

/// Read-only source of provider values.
///
/// `snapshot` is called once per resolution.
pub trait VersionProvider {
    /// Take a snapshot of the provider's current values.
    fn snapshot(&self) -> Result<ProviderValues>;
}

impl VersionProvider for ProviderValues {
    fn snapshot(&self) -> Result<ProviderValues> {
        Ok(self.clone())
    }
}

/// A provider backed by a snapshot file on disk.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Create a provider reading from the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileProvider { path: path.into() }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_properties(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext == "properties")
    }
}

impl VersionProvider for FileProvider {
    fn snapshot(&self) -> Result<ProviderValues> {
        if !self.path.exists() {
            bail!("provider snapshot not found: {}", self.path.display());
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read provider snapshot: {}", self.path.display()))?;

        tracing::debug!("Reading provider values from {}", self.path.display());

        let values = if self.is_properties() {
            ProviderValues::from_properties(&contents)
        } else {
            ProviderValues::from_toml(&contents)
        };

        values.with_context(|| format!("invalid provider snapshot: {}", self.path.display()))
    }
}

/// Parse `key=value` / `key: value` lines in Java properties syntax.
///
/// Blank lines and lines starting with `#` or `!` are skipped. Backslash
/// escapes are decoded; line continuations are not supported.
fn parse_properties(contents: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();

    for line in contents.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut key = String::new();
        let mut chars = line.chars();
        let mut escaped = false;
        for c in chars.by_ref() {
            if escaped {
                key.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '=' || c == ':' {
                break;
            } else {
                key.push(c);
            }
        }

        let value = unescape(chars.as_str().trim());
        props.insert(key.trim().to_string(), value);
    }

    props
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
