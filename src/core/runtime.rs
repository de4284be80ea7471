//! Language runtime (Java) versions.
//!
//! Source and target compatibility are expressed as Java feature releases.
//! Any positive feature number parses; whether it is *supported* is decided
//! by the compatibility table, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A Java feature release (8, 11, 17, 21, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "JavaVersionRepr", into = "u32")]
pub struct JavaVersion(u8);

impl JavaVersion {
    pub const JAVA_8: JavaVersion = JavaVersion(8);
    pub const JAVA_11: JavaVersion = JavaVersion(11);
    pub const JAVA_17: JavaVersion = JavaVersion(17);
    pub const JAVA_21: JavaVersion = JavaVersion(21);

    /// Create a Java version from its feature release number.
    pub const fn new(feature: u8) -> Self {
        JavaVersion(feature)
    }

    /// Get the feature release number.
    pub const fn feature(self) -> u8 {
        self.0
    }

    /// Get the Gradle `JavaVersion` constant name (e.g., `VERSION_1_8`, `VERSION_17`).
    pub fn gradle_name(self) -> String {
        if self.0 <= 8 {
            format!("VERSION_1_{}", self.0)
        } else {
            format!("VERSION_{}", self.0)
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Releases up to 8 are conventionally written with the `1.` prefix.
        if self.0 <= 8 {
            write!(f, "1.{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<JavaVersion> for u32 {
    fn from(version: JavaVersion) -> Self {
        u32::from(version.0)
    }
}

/// Error returned when parsing an invalid Java version.
#[derive(Debug, Clone)]
pub struct JavaVersionParseError(pub String);

impl fmt::Display for JavaVersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid Java version '{}', expected e.g. 1.8, 11, 17 or VERSION_17",
            self.0
        )
    }
}

impl std::error::Error for JavaVersionParseError {}

impl FromStr for JavaVersion {
    type Err = JavaVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || JavaVersionParseError(s.to_string());

        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix("JavaVersion.").unwrap_or(trimmed);
        let normalized = match trimmed.strip_prefix("VERSION_") {
            Some(rest) => rest.replace('_', "."),
            None => trimmed.to_string(),
        };

        let feature = match normalized.strip_prefix("1.") {
            Some(legacy) => legacy.parse::<u8>().map_err(|_| err())?,
            None => normalized.parse::<u8>().map_err(|_| err())?,
        };

        if feature == 0 {
            return Err(err());
        }

        Ok(JavaVersion(feature))
    }
}

/// Accepted serialized shapes: `17`, `1.8`, or `"17"` / `"1.8"` / `"VERSION_17"`.
#[derive(Deserialize)]
#[serde(
    untagged,
    expecting = "a Java version such as 17, 1.8, \"17\", \"1.8\" or \"VERSION_17\""
)]
enum JavaVersionRepr {
    Number(u32),
    Float(f64),
    Text(String),
}

impl TryFrom<JavaVersionRepr> for JavaVersion {
    type Error = JavaVersionParseError;

    fn try_from(repr: JavaVersionRepr) -> Result<Self, Self::Error> {
        match repr {
            JavaVersionRepr::Number(n) => u8::try_from(n)
                .ok()
                .filter(|n| *n > 0)
                .map(JavaVersion)
                .ok_or_else(|| JavaVersionParseError(n.to_string())),
            JavaVersionRepr::Float(f) => f.to_string().parse(),
            JavaVersionRepr::Text(s) => s.parse(),
        }
    }
}

/// Source/target language compatibility for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCompatibility {
    /// Language level the sources are written against
    pub source_compatibility: JavaVersion,

    /// Bytecode level emitted by the Java compiler
    pub target_compatibility: JavaVersion,

    /// Bytecode level emitted by the Kotlin compiler
    pub jvm_target: JavaVersion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("17".parse::<JavaVersion>().unwrap(), JavaVersion::JAVA_17);
        assert_eq!("1.8".parse::<JavaVersion>().unwrap(), JavaVersion::JAVA_8);
        assert_eq!("VERSION_1_8".parse::<JavaVersion>().unwrap(), JavaVersion::JAVA_8);
        assert_eq!("VERSION_11".parse::<JavaVersion>().unwrap(), JavaVersion::JAVA_11);
        assert_eq!(
            "JavaVersion.VERSION_17".parse::<JavaVersion>().unwrap(),
            JavaVersion::JAVA_17
        );
        assert!("seventeen".parse::<JavaVersion>().is_err());
        assert!("0".parse::<JavaVersion>().is_err());
    }

    #[test]
    fn test_display_and_gradle_name() {
        assert_eq!(JavaVersion::JAVA_8.to_string(), "1.8");
        assert_eq!(JavaVersion::JAVA_21.to_string(), "21");
        assert_eq!(JavaVersion::JAVA_8.gradle_name(), "VERSION_1_8");
        assert_eq!(JavaVersion::JAVA_17.gradle_name(), "VERSION_17");
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_num: JavaVersion = serde_json::from_str("11").unwrap();
        let from_str: JavaVersion = serde_json::from_str("\"VERSION_11\"").unwrap();
        assert_eq!(from_num, from_str);
        assert!(serde_json::from_str::<JavaVersion>("300").is_err());
        assert_eq!(serde_json::to_string(&JavaVersion::JAVA_17).unwrap(), "17");
    }

    #[derive(Debug, Deserialize)]
    struct Compat {
        source: JavaVersion,
    }

    #[test]
    fn test_deserialize_toml_float() {
        let legacy: Compat = toml::from_str("source = 1.8").unwrap();
        assert_eq!(legacy.source, JavaVersion::JAVA_8);

        let whole: Compat = toml::from_str("source = 17.0").unwrap();
        assert_eq!(whole.source, JavaVersion::JAVA_17);

        assert!(toml::from_str::<Compat>("source = 0.5").is_err());
    }

    #[test]
    fn test_deserialize_error_lists_accepted_forms() {
        let err = toml::from_str::<Compat>("source = true").unwrap_err();
        assert!(err.to_string().contains("VERSION_17"), "{}", err);
    }
}
