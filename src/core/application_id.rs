//! Application identifiers.
//!
//! Application ids (and namespaces) follow the platform's reverse-domain
//! grammar: at least two `.`-separated segments, each starting with an ASCII
//! letter followed by letters, digits or underscores.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static APPLICATION_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$")
        .expect("application id pattern is valid")
});

/// A validated reverse-domain application identifier (e.g., `com.example.app`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Parse and validate an application identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidApplicationId> {
        if APPLICATION_ID_RE.is_match(s) {
            Ok(ApplicationId(s.to_string()))
        } else {
            Err(InvalidApplicationId(s.to_string()))
        }
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = InvalidApplicationId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ApplicationId::parse(&s)
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

/// Error returned for identifiers that violate the reverse-domain grammar.
#[derive(Debug, Clone)]
pub struct InvalidApplicationId(pub String);

impl fmt::Display for InvalidApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid application id '{}', expected reverse-domain segments like com.example.app",
            self.0
        )
    }
}

impl std::error::Error for InvalidApplicationId {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        for id in ["com.example.pavo_efectivo", "io.app", "org.Foo2.bar_baz"] {
            assert!(ApplicationId::parse(id).is_ok(), "{} should be valid", id);
        }
    }

    #[test]
    fn test_invalid_ids() {
        for id in ["app", "com..example", "com.1example", "_com.example", "com.example.", "com.ex-ample", ""] {
            assert!(ApplicationId::parse(id).is_err(), "{} should be invalid", id);
        }
    }

    #[test]
    fn test_segments() {
        let id = ApplicationId::parse("com.example.app").unwrap();
        assert_eq!(id.segments().collect::<Vec<_>>(), vec!["com", "example", "app"]);
    }

    #[test]
    fn test_deserialize_rejects_bad_grammar() {
        assert!(serde_json::from_str::<ApplicationId>("\"com.example\"").is_ok());
        assert!(serde_json::from_str::<ApplicationId>("\"example\"").is_err());
    }
}
