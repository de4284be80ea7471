//! Build variants.

use serde::{Deserialize, Serialize};

/// Per-variant options as declared in a manifest `[variants.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VariantSpec {
    /// Defaults to true for `debug`, false otherwise
    #[serde(default)]
    pub debuggable: Option<bool>,

    /// Enable code shrinking
    #[serde(default)]
    pub minify: bool,
}

/// A named build configuration (e.g., `debug`, `release`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariant {
    pub name: String,
    pub debuggable: bool,
    pub minify: bool,
}

impl BuildVariant {
    /// Create a variant with the conventional defaults for its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let debuggable = name == "debug";
        BuildVariant {
            name,
            debuggable,
            minify: false,
        }
    }

    /// Create a variant from its manifest declaration.
    pub fn from_spec(name: &str, spec: &VariantSpec) -> Self {
        let mut variant = BuildVariant::new(name);
        if let Some(debuggable) = spec.debuggable {
            variant.debuggable = debuggable;
        }
        variant.minify = spec.minify;
        variant
    }

    /// The two variants every project has unless it declares its own set.
    pub fn defaults() -> Vec<BuildVariant> {
        vec![BuildVariant::new("debug"), BuildVariant::new("release")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_defaults() {
        let variants = BuildVariant::defaults();
        assert_eq!(variants.len(), 2);
        assert!(variants[0].debuggable);
        assert!(!variants[1].debuggable);
        assert!(!variants[1].minify);
    }

    #[test]
    fn test_from_spec_overrides() {
        let spec = VariantSpec {
            debuggable: Some(true),
            minify: true,
        };
        let variant = BuildVariant::from_spec("profile", &spec);
        assert_eq!(variant.name, "profile");
        assert!(variant.debuggable);
        assert!(variant.minify);
    }
}
