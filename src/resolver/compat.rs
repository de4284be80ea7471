//! Platform compatibility table.
//!
//! Static, versioned reference data: which API levels can be compiled
//! against, the absolute `minSdk` floor, and which Java releases the
//! toolchain accepts for source/target compatibility. Updates to this data
//! bump [`TABLE_VERSION`].

use crate::core::api_level::ApiLevel;
use crate::core::runtime::JavaVersion;

/// Version of the built-in table data.
pub const TABLE_VERSION: u32 = 3;

/// Lowest API level the toolchain still produces working artifacts for.
///
/// Embedded third-party native libraries are not built below this level.
pub const PLATFORM_FLOOR: ApiLevel = ApiLevel::new(21);

/// A platform release known to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRelease {
    pub api_level: ApiLevel,
    /// Marketing version (e.g., "14")
    pub version: &'static str,
    pub codename: &'static str,
}

const fn release(level: u32, version: &'static str, codename: &'static str) -> PlatformRelease {
    PlatformRelease {
        api_level: ApiLevel::new(level),
        version,
        codename,
    }
}

static RELEASES: &[PlatformRelease] = &[
    release(21, "5.0", "Lollipop"),
    release(22, "5.1", "Lollipop"),
    release(23, "6.0", "Marshmallow"),
    release(24, "7.0", "Nougat"),
    release(25, "7.1", "Nougat"),
    release(26, "8.0", "Oreo"),
    release(27, "8.1", "Oreo"),
    release(28, "9", "Pie"),
    release(29, "10", "Quince Tart"),
    release(30, "11", "Red Velvet Cake"),
    release(31, "12", "Snow Cone"),
    release(32, "12L", "Snow Cone v2"),
    release(33, "13", "Tiramisu"),
    release(34, "14", "Upside Down Cake"),
    release(35, "15", "Vanilla Ice Cream"),
];

static SUPPORTED_RUNTIMES: &[JavaVersion] = &[
    JavaVersion::JAVA_8,
    JavaVersion::JAVA_11,
    JavaVersion::JAVA_17,
    JavaVersion::JAVA_21,
];

static BUILTIN: CompatibilityTable = CompatibilityTable {
    version: TABLE_VERSION,
    releases: RELEASES,
    floor: PLATFORM_FLOOR,
    runtimes: SUPPORTED_RUNTIMES,
};

/// Result of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSupport {
    pub candidate: ApiLevel,
    pub min_supported: ApiLevel,
    pub max_supported: ApiLevel,
    /// Release metadata for the candidate, when the table knows it
    pub release: Option<&'static PlatformRelease>,
}

impl ApiSupport {
    /// Whether the looked-up candidate is inside the supported range.
    ///
    /// Gaps in a custom table still count as supported; `release` is then `None`.
    pub fn is_supported(&self) -> bool {
        self.min_supported <= self.candidate && self.candidate <= self.max_supported
    }
}

/// Read-only compatibility data, safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityTable {
    version: u32,
    releases: &'static [PlatformRelease],
    floor: ApiLevel,
    runtimes: &'static [JavaVersion],
}

impl CompatibilityTable {
    /// The built-in table.
    pub fn builtin() -> &'static CompatibilityTable {
        &BUILTIN
    }

    /// Create a table from custom data. `releases` must be sorted and non-empty.
    pub fn new(
        version: u32,
        releases: &'static [PlatformRelease],
        floor: ApiLevel,
        runtimes: &'static [JavaVersion],
    ) -> Self {
        debug_assert!(!releases.is_empty());
        debug_assert!(releases.windows(2).all(|w| w[0].api_level < w[1].api_level));
        CompatibilityTable {
            version,
            releases,
            floor,
            runtimes,
        }
    }

    /// Data version of this table.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Absolute `minSdk` floor.
    pub fn floor(&self) -> ApiLevel {
        self.floor
    }

    /// Look up the supported range and release metadata for a candidate level.
    pub fn lookup(&self, candidate: ApiLevel) -> ApiSupport {
        ApiSupport {
            candidate,
            min_supported: self.min_supported(),
            max_supported: self.max_supported(),
            release: self.release(candidate),
        }
    }

    /// Release metadata for an API level.
    pub fn release(&self, level: ApiLevel) -> Option<&'static PlatformRelease> {
        self.releases
            .binary_search_by_key(&level, |r| r.api_level)
            .ok()
            .map(|i| &self.releases[i])
    }

    pub fn min_supported(&self) -> ApiLevel {
        self.releases.first().map(|r| r.api_level).unwrap_or(self.floor)
    }

    pub fn max_supported(&self) -> ApiLevel {
        self.releases.last().map(|r| r.api_level).unwrap_or(self.floor)
    }

    /// All releases, lowest first.
    pub fn releases(&self) -> &'static [PlatformRelease] {
        self.releases
    }

    /// Supported Java releases, lowest first.
    pub fn runtimes(&self) -> &'static [JavaVersion] {
        self.runtimes
    }

    /// Whether a Java release is in the supported set.
    pub fn supports_runtime(&self, version: JavaVersion) -> bool {
        self.runtimes.contains(&version)
    }
}
