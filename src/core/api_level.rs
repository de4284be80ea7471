//! Platform API levels.
//!
//! An API level identifies the platform surface a build is compiled against,
//! targets, or still supports at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A platform API level (e.g., 34 for Android 14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiLevel(u32);

impl ApiLevel {
    /// Create an API level from its numeric value.
    pub const fn new(level: u32) -> Self {
        ApiLevel(level)
    }

    /// Get the numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ApiLevel {
    fn from(level: u32) -> Self {
        ApiLevel(level)
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing an invalid API level string.
#[derive(Debug, Clone)]
pub struct ApiLevelParseError(pub String);

impl fmt::Display for ApiLevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid API level '{}', expected a positive integer", self.0)
    }
}

impl std::error::Error for ApiLevelParseError {}

impl FromStr for ApiLevel {
    type Err = ApiLevelParseError;

    /// Accepts `34` as well as the `android-34` platform directory form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("android-").unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .ok()
            .filter(|level| *level > 0)
            .map(ApiLevel)
            .ok_or_else(|| ApiLevelParseError(s.to_string()))
    }
}
