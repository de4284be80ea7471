//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.buildprofile/config.toml` - User-wide defaults
//! - Project: `.buildprofile/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::encode::EmitFormat;

/// Name of the per-project and per-user configuration directory.
pub const CONFIG_DIR: &str = ".buildprofile";

/// Resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output settings
    pub emit: EmitConfig,

    /// Provider snapshot settings
    pub provider: ProviderConfig,

    /// Signing policy
    pub signing: SigningPolicyConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmitConfig {
    /// Default output format (json, toml)
    pub format: Option<String>,
}

/// Provider-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Snapshot file used when the manifest names none
    pub path: Option<PathBuf>,
}

/// Signing policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SigningPolicyConfig {
    /// Fail instead of warning when a variant falls back to another identity
    pub deny_fallback: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.emit.format.is_some() {
            self.emit.format = other.emit.format;
        }
        if other.provider.path.is_some() {
            self.provider.path = other.provider.path;
        }
        if other.signing.deny_fallback.is_some() {
            self.signing.deny_fallback = other.signing.deny_fallback;
        }
    }

    /// Whether signing fallbacks are denied (off unless configured).
    pub fn deny_fallback(&self) -> bool {
        self.signing.deny_fallback.unwrap_or(false)
    }

    /// Parse the configured output format.
    ///
    /// An unrecognized value is reported and ignored.
    pub fn emit_format(&self) -> Option<EmitFormat> {
        let raw = self.emit.format.as_deref()?;
        match raw.parse() {
            Ok(format) => Some(format),
            Err(e) => {
                tracing::warn!("Ignoring [emit] format in config: {}", e);
                None
            }
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.buildprofile/config.toml)
/// 2. Global config (~/.buildprofile/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.buildprofile).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.buildprofile/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.buildprofile/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.emit.format.is_none());
        assert!(config.provider.path.is_none());
        assert!(config.signing.deny_fallback.is_none());
        assert!(!config.deny_fallback());
        assert_eq!(config.emit_format(), None);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[emit]
format = "toml"

[provider]
path = "android/local.properties"

[signing]
deny-fallback = true
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.emit_format(), Some(EmitFormat::Toml));
        assert_eq!(
            config.provider.path,
            Some(PathBuf::from("android/local.properties"))
        );
        assert!(config.deny_fallback());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.emit.format = Some("json".to_string());
        base.provider.path = Some(PathBuf::from("global.toml"));

        let mut override_cfg = Config::default();
        override_cfg.emit.format = Some("toml".to_string());

        base.merge(override_cfg);

        assert_eq!(base.emit.format, Some("toml".to_string()));
        assert_eq!(base.provider.path, Some(PathBuf::from("global.toml")));
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());

        std::fs::write(&global, "[emit]\nformat = \"toml\"\n[signing]\ndeny-fallback = true\n")
            .unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[emit]\nformat = \"json\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.emit_format(), Some(EmitFormat::Json));
        assert!(config.deny_fallback());
    }

    #[test]
    fn test_project_can_turn_deny_fallback_off() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());

        std::fs::write(&global, "[signing]\ndeny-fallback = true\n").unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[signing]\ndeny-fallback = false\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.signing.deny_fallback, Some(false));
        assert!(!config.deny_fallback());
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[emit\nformat = ").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_unknown_format_ignored() {
        let mut config = Config::default();
        config.emit.format = Some("yaml".to_string());
        assert_eq!(config.emit_format(), None);
    }
}
