//! Signing identities and the registry that owns them.
//!
//! Identities carry only *references* to credentials (keystore path, key
//! alias, names of environment variables holding passwords). Secrets are
//! never read or stored here.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the identity every platform install provides for debug builds.
pub const DEBUG_IDENTITY: &str = "debug";

/// Keystore path of the platform's implicit debug identity.
pub const DEBUG_KEYSTORE: &str = "~/.android/debug.keystore";

/// Key alias inside the platform's debug keystore.
pub const DEBUG_KEY_ALIAS: &str = "androiddebugkey";

/// A named signing credential set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningIdentity {
    /// Registry name (e.g., "debug", "upload")
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_alias: Option<String>,

    /// Environment variable holding the keystore password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_password_env: Option<String>,

    /// Environment variable holding the key password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_password_env: Option<String>,
}

impl SigningIdentity {
    /// Create an identity with no credential references.
    pub fn new(name: impl Into<String>) -> Self {
        SigningIdentity {
            name: name.into(),
            store_file: None,
            key_alias: None,
            store_password_env: None,
            key_password_env: None,
        }
    }

    /// The identity the platform provides implicitly for debug builds.
    pub fn platform_debug() -> Self {
        SigningIdentity {
            name: DEBUG_IDENTITY.to_string(),
            store_file: Some(PathBuf::from(DEBUG_KEYSTORE)),
            key_alias: Some(DEBUG_KEY_ALIAS.to_string()),
            store_password_env: None,
            key_password_env: None,
        }
    }

    /// Set the keystore file.
    pub fn with_store_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_file = Some(path.into());
        self
    }

    /// Set the key alias.
    pub fn with_key_alias(mut self, alias: impl Into<String>) -> Self {
        self.key_alias = Some(alias.into());
        self
    }
}

/// Identity fields as declared in a manifest `[signing-configs.<name>]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SigningConfigSpec {
    #[serde(default)]
    pub store_file: Option<PathBuf>,

    #[serde(default)]
    pub key_alias: Option<String>,

    #[serde(default)]
    pub store_password_env: Option<String>,

    #[serde(default)]
    pub key_password_env: Option<String>,
}

impl SigningConfigSpec {
    /// Turn the declaration into a named identity.
    pub fn into_identity(self, name: &str) -> SigningIdentity {
        SigningIdentity {
            name: name.to_string(),
            store_file: self.store_file,
            key_alias: self.key_alias,
            store_password_env: self.store_password_env,
            key_password_env: self.key_password_env,
        }
    }
}

/// Registry of known signing identities, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SigningRegistry {
    identities: BTreeMap<String, SigningIdentity>,
}

impl SigningRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        SigningRegistry::default()
    }

    /// Create a registry holding only the platform debug identity.
    pub fn with_platform_debug() -> Self {
        let mut registry = SigningRegistry::new();
        registry.insert(SigningIdentity::platform_debug());
        registry
    }

    /// Add or replace an identity.
    pub fn insert(&mut self, identity: SigningIdentity) {
        self.identities.insert(identity.name.clone(), identity);
    }

    /// Builder-style insert.
    pub fn with(mut self, identity: SigningIdentity) -> Self {
        self.insert(identity);
        self
    }

    /// Look up an identity by name.
    pub fn lookup(&self, name: &str) -> Option<&SigningIdentity> {
        self.identities.get(name)
    }

    /// Check whether an identity exists.
    pub fn contains(&self, name: &str) -> bool {
        self.identities.contains_key(name)
    }

    /// Identity names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.identities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

/// Per-variant fallback rules: variant name -> identity to borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackRules {
    rules: BTreeMap<String, String>,
}

impl FallbackRules {
    /// No fallback rules at all.
    pub fn none() -> Self {
        FallbackRules {
            rules: BTreeMap::new(),
        }
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, variant: impl Into<String>, identity: impl Into<String>) {
        self.rules.insert(variant.into(), identity.into());
    }

    /// Get the identity a variant falls back to, if a rule exists.
    pub fn fallback_for(&self, variant: &str) -> Option<&str> {
        self.rules.get(variant).map(String::as_str)
    }

    /// Overlay another rule set (other takes precedence).
    pub fn merge(&mut self, other: FallbackRules) {
        self.rules.extend(other.rules);
    }
}

impl Default for FallbackRules {
    /// `release` and `profile` borrow the debug identity.
    fn default() -> Self {
        let mut rules = FallbackRules::none();
        rules.insert("release", DEBUG_IDENTITY);
        rules.insert("profile", DEBUG_IDENTITY);
        rules
    }
}
