//! Global context for resolver operations.
//!
//! Provides centralized access to the working directory, output settings,
//! and configuration paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest, ManifestError};
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Explicit manifest path (`--manifest-path`)
    manifest_path: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            manifest_path: None,
            verbose: false,
        }
    }

    /// Use an explicit manifest instead of searching upward.
    pub fn set_manifest_path(&mut self, path: Option<PathBuf>) {
        self.manifest_path = path.map(|p| {
            if p.is_absolute() {
                p
            } else {
                self.cwd.join(p)
            }
        });
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        config::global_config_path()
    }

    /// Get the project configuration file path for a project root.
    pub fn project_config_path(&self, project_root: &Path) -> PathBuf {
        config::project_config_path(project_root)
    }

    /// Load merged global and project configuration.
    pub fn load_config(&self, project_root: &Path) -> Config {
        config::load_config(
            self.config_path().as_deref(),
            &self.project_config_path(project_root),
        )
    }

    /// Find the manifest: the explicit path if given, otherwise the nearest
    /// `build-profile.toml` from cwd upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        match &self.manifest_path {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => Err(ManifestError::Missing { path: path.clone() }),
            None => find_manifest(&self.cwd),
        }
    }
}
