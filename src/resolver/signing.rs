//! Variant signing selection.
//!
//! For each variant, in order:
//! 1. An explicit binding that names a registry identity
//! 2. A registry identity named after the variant (dedicated)
//! 3. The variant's fallback rule, recorded as a warning
//! 4. Otherwise `UnresolvedSigningIdentity`
//!
//! Selection for one variant never looks at another variant, so a set of
//! variants is selected in parallel.

use rayon::prelude::*;

use crate::core::profile::{BindingSource, SigningFallback, SigningSelection};
use crate::core::signing::{FallbackRules, SigningRegistry};
use crate::core::variant::BuildVariant;
use crate::resolver::errors::ProfileError;

/// Selects signing identities for variants.
#[derive(Debug, Clone, Copy)]
pub struct SigningSelector<'a> {
    registry: &'a SigningRegistry,
    fallbacks: &'a FallbackRules,
    deny_fallback: bool,
}

impl<'a> SigningSelector<'a> {
    /// Create a selector over a registry and fallback rules.
    pub fn new(registry: &'a SigningRegistry, fallbacks: &'a FallbackRules) -> Self {
        SigningSelector {
            registry,
            fallbacks,
            deny_fallback: false,
        }
    }

    /// Treat any fallback as an error.
    pub fn deny_fallback(mut self, deny: bool) -> Self {
        self.deny_fallback = deny;
        self
    }

    /// Select the signing identity for one variant.
    pub fn select(
        &self,
        variant: &str,
        explicit: Option<&str>,
    ) -> Result<SigningSelection, ProfileError> {
        if let Some(name) = explicit {
            if let Some(identity) = self.registry.lookup(name) {
                tracing::debug!("{}: signing with explicit identity `{}`", variant, name);
                return Ok(SigningSelection {
                    variant: variant.to_string(),
                    identity: identity.clone(),
                    source: BindingSource::Explicit,
                    fallback: None,
                });
            }
        } else if let Some(identity) = self.registry.lookup(variant) {
            tracing::debug!("{}: signing with dedicated identity", variant);
            return Ok(SigningSelection {
                variant: variant.to_string(),
                identity: identity.clone(),
                source: BindingSource::Dedicated,
                fallback: None,
            });
        }

        let unresolved = || ProfileError::UnresolvedSigningIdentity {
            variant: variant.to_string(),
            identity: explicit.map(str::to_string),
        };

        let target = self.fallbacks.fallback_for(variant).ok_or_else(unresolved)?;
        let identity = self.registry.lookup(target).ok_or_else(unresolved)?;

        if self.deny_fallback {
            return Err(ProfileError::SigningFallbackDenied {
                variant: variant.to_string(),
                identity: target.to_string(),
            });
        }

        let fallback = SigningFallback {
            variant: variant.to_string(),
            identity: target.to_string(),
            unknown_binding: explicit.map(str::to_string),
            bypassed_dedicated: explicit.is_some() && self.registry.contains(variant),
        };
        tracing::warn!("{}", fallback);

        Ok(SigningSelection {
            variant: variant.to_string(),
            identity: identity.clone(),
            source: BindingSource::Fallback,
            fallback: Some(fallback),
        })
    }

    /// Select identities for a set of variants.
    ///
    /// Selections run in parallel; results come back in input order, and the
    /// first failing variant (in input order) is reported.
    pub fn select_all<'b, F>(
        &self,
        variants: &[BuildVariant],
        binding_for: F,
    ) -> Result<Vec<SigningSelection>, ProfileError>
    where
        F: Fn(&BuildVariant) -> Option<&'b str> + Sync,
    {
        let results: Vec<Result<SigningSelection, ProfileError>> = variants
            .par_iter()
            .map(|variant| self.select(&variant.name, binding_for(variant)))
            .collect();

        results.into_iter().collect()
    }
}
