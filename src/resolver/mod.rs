//! Build profile resolution.
//!
//! Resolution runs four pure stages over a provider snapshot:
//! merge ([`merge::resolve`]) -> validate ([`validate::ConstraintValidator`])
//! -> sign ([`signing::SigningSelector`]) -> emit ([`encode::emit`]).
//! All I/O (reading the manifest and provider, writing the profile) happens
//! outside this module.

pub mod compat;
pub mod encode;
pub mod errors;
pub mod merge;
pub mod signing;
pub mod validate;

pub use compat::{CompatibilityTable, PLATFORM_FLOOR, TABLE_VERSION};
pub use encode::{emit, EmitFormat, SerializedProfile};
pub use errors::{ErrorKind, ProfileError};
pub use signing::SigningSelector;
pub use validate::ConstraintValidator;

use crate::core::manifest::ProfileManifest;
use crate::core::profile::{Resolution, ResolvedProfile};
use crate::core::provider::ProviderValues;
use crate::core::settings::ExplicitSettings;
use crate::core::signing::{FallbackRules, SigningRegistry};
use crate::core::variant::BuildVariant;

/// Runs the full resolution pipeline for one build invocation.
#[derive(Debug, Clone, Copy)]
pub struct BuildProfileResolver<'a> {
    table: &'a CompatibilityTable,
    registry: &'a SigningRegistry,
    fallbacks: &'a FallbackRules,
    variants: &'a [BuildVariant],
    deny_fallback: bool,
}

impl<'a> BuildProfileResolver<'a> {
    /// Create a resolver using the built-in compatibility table.
    pub fn new(
        registry: &'a SigningRegistry,
        fallbacks: &'a FallbackRules,
        variants: &'a [BuildVariant],
    ) -> Self {
        BuildProfileResolver {
            table: CompatibilityTable::builtin(),
            registry,
            fallbacks,
            variants,
            deny_fallback: false,
        }
    }

    /// Create a resolver from a parsed manifest.
    pub fn for_manifest(manifest: &'a ProfileManifest) -> Self {
        Self::new(&manifest.registry, &manifest.fallbacks, &manifest.variants)
    }

    /// Use a custom compatibility table.
    pub fn with_table(mut self, table: &'a CompatibilityTable) -> Self {
        self.table = table;
        self
    }

    /// Turn signing fallbacks into errors.
    pub fn deny_fallback(mut self, deny: bool) -> Self {
        self.deny_fallback = deny;
        self
    }

    /// Merge, validate and sign.
    pub fn resolve(
        &self,
        explicit: &ExplicitSettings,
        provider: &ProviderValues,
    ) -> Result<Resolution, ProfileError> {
        let candidate = merge::resolve(explicit, provider)?;
        let validated = ConstraintValidator::new(self.table).validate(candidate)?;

        let selections = SigningSelector::new(self.registry, self.fallbacks)
            .deny_fallback(self.deny_fallback)
            .select_all(self.variants, |variant| explicit.signing_for(&variant.name))?;

        let warnings = selections
            .iter()
            .filter_map(|s| s.fallback.clone())
            .collect();

        let profile = ResolvedProfile::assemble(validated, self.variants, selections);

        tracing::debug!(
            "Resolved {} ({} variants)",
            profile.application_id,
            profile.variants.len()
        );

        Ok(Resolution { profile, warnings })
    }

    /// Merge, validate, sign and serialize.
    pub fn resolve_and_emit(
        &self,
        explicit: &ExplicitSettings,
        provider: &ProviderValues,
        format: EmitFormat,
    ) -> Result<(Resolution, SerializedProfile), ProfileError> {
        let resolution = self.resolve(explicit, provider)?;
        let serialized = emit(&resolution.profile, format)?;
        Ok((resolution, serialized))
    }
}
