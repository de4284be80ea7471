//! Project resolution operations.
//!
//! This is the I/O shell around the pure resolver: it locates and loads the
//! manifest, merges configuration, takes the provider snapshot, and writes
//! the serialized profile.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::manifest::ProfileManifest;
use crate::core::profile::Resolution;
use crate::core::provider::{FileProvider, ProviderValues, VersionProvider};
use crate::resolver::{BuildProfileResolver, EmitFormat, SerializedProfile};
use crate::util::config::Config;
use crate::util::fs::write_atomic;
use crate::util::hash::short;
use crate::util::GlobalContext;

/// Options for resolving a project.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Output format (None = config, then JSON)
    pub format: Option<EmitFormat>,

    /// Write the profile here instead of returning it only
    pub output: Option<PathBuf>,

    /// Provider snapshot overriding the manifest and config
    pub provider: Option<PathBuf>,

    /// Fail on signing fallbacks
    pub deny_fallback: bool,
}

/// Result of a successful resolution.
#[derive(Debug, Clone)]
pub struct ResolveOutcome {
    /// Manifest the profile was resolved from
    pub manifest_path: PathBuf,

    /// Resolved profile and signing warnings
    pub resolution: Resolution,

    /// Serialized profile
    pub serialized: SerializedProfile,

    /// File the profile was written to, if any
    pub written_to: Option<PathBuf>,
}

/// Inputs gathered from disk for one resolution.
struct ProjectInputs {
    manifest: ProfileManifest,
    config: Config,
    provider: ProviderValues,
}

fn load_inputs(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<ProjectInputs> {
    let manifest_path = ctx.find_manifest()?;
    let manifest = ProfileManifest::load(&manifest_path)?;
    let config = ctx.load_config(manifest.root());

    let provider_path = provider_path(ctx, opts, &manifest, &config)?;
    let provider = FileProvider::new(provider_path).snapshot()?;

    Ok(ProjectInputs {
        manifest,
        config,
        provider,
    })
}

/// Pick the provider snapshot: `--provider`, then the manifest's
/// `[provider] path`, then the config's.
fn provider_path(
    ctx: &GlobalContext,
    opts: &ResolveOptions,
    manifest: &ProfileManifest,
    config: &Config,
) -> Result<PathBuf> {
    if let Some(path) = &opts.provider {
        return Ok(absolute(ctx.cwd(), path));
    }
    if let Some(path) = &manifest.provider_path {
        return Ok(path.clone());
    }
    if let Some(path) = &config.provider.path {
        return Ok(absolute(manifest.root(), path));
    }

    bail!(
        "no provider snapshot configured for {}\n\
         hint: add `[provider] path = \"local.properties\"` to the manifest or pass --provider",
        manifest.path().display()
    )
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Resolve, serialize, and optionally write the project's profile.
pub fn resolve_project(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<ResolveOutcome> {
    let inputs = load_inputs(ctx, opts)?;
    let manifest = &inputs.manifest;

    let format = opts
        .format
        .or_else(|| inputs.config.emit_format())
        .unwrap_or_default();
    let deny_fallback = opts.deny_fallback || inputs.config.deny_fallback();

    let (resolution, serialized) = BuildProfileResolver::for_manifest(manifest)
        .deny_fallback(deny_fallback)
        .resolve_and_emit(&manifest.settings, &inputs.provider, format)?;

    let written_to = match &opts.output {
        Some(output) => {
            let output = absolute(ctx.cwd(), output);
            write_atomic(&output, serialized.as_str())?;
            tracing::info!("Wrote {} profile to {}", format, output.display());
            Some(output)
        }
        None => None,
    };

    let fingerprint = serialized.fingerprint();
    tracing::info!(
        "Resolved {} ({} variants, fingerprint {})",
        resolution.profile.application_id,
        resolution.profile.variants.len(),
        short(&fingerprint)
    );

    Ok(ResolveOutcome {
        manifest_path: manifest.path().to_path_buf(),
        resolution,
        serialized,
        written_to,
    })
}

/// Resolve the project without serializing or writing anything.
pub fn check_project(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<Resolution> {
    let inputs = load_inputs(ctx, opts)?;
    let deny_fallback = opts.deny_fallback || inputs.config.deny_fallback();

    let resolution = BuildProfileResolver::for_manifest(&inputs.manifest)
        .deny_fallback(deny_fallback)
        .resolve(&inputs.manifest.settings, &inputs.provider)?;

    Ok(resolution)
}
