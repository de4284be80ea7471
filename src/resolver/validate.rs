//! Constraint validation of candidate profiles.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. SDK ordering: `minSdk <= targetSdk <= compileSdk`
//! 2. `compileSdk` inside the table's supported range
//! 3. `minSdk` at or above the platform floor
//! 4. Language runtime: supported releases, `source <= target`,
//!    `jvmTarget == targetCompatibility`

use crate::core::profile::{CandidateProfile, SdkLevels, ValidatedProfile};
use crate::core::runtime::{JavaVersion, LanguageCompatibility};
use crate::resolver::compat::CompatibilityTable;
use crate::resolver::errors::ProfileError;

/// Validates candidates against a compatibility table.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintValidator<'a> {
    table: &'a CompatibilityTable,
}

impl<'a> ConstraintValidator<'a> {
    /// Create a validator over the given table.
    pub fn new(table: &'a CompatibilityTable) -> Self {
        ConstraintValidator { table }
    }

    /// Validate a candidate; no partial profile is returned on failure.
    pub fn validate(&self, candidate: CandidateProfile) -> Result<ValidatedProfile, ProfileError> {
        self.validate_ordering(&candidate.sdk)?;
        self.validate_compile_sdk(&candidate.sdk)?;
        self.validate_floor(&candidate.sdk)?;
        self.validate_language(&candidate.language)?;
        Ok(ValidatedProfile::new(candidate))
    }

    fn validate_ordering(&self, sdk: &SdkLevels) -> Result<(), ProfileError> {
        if sdk.target_sdk < sdk.min_sdk {
            return Err(ProfileError::InvalidSdkOrdering {
                field: "targetSdk",
                value: sdk.target_sdk,
                bound_field: "minSdk",
                bound: sdk.min_sdk,
            });
        }
        if sdk.compile_sdk < sdk.target_sdk {
            return Err(ProfileError::InvalidSdkOrdering {
                field: "compileSdk",
                value: sdk.compile_sdk,
                bound_field: "targetSdk",
                bound: sdk.target_sdk,
            });
        }
        Ok(())
    }

    fn validate_compile_sdk(&self, sdk: &SdkLevels) -> Result<(), ProfileError> {
        let support = self.table.lookup(sdk.compile_sdk);
        if !support.is_supported() {
            return Err(ProfileError::UnsupportedApiLevel {
                field: "compileSdk",
                value: sdk.compile_sdk,
                min_supported: support.min_supported,
                max_supported: support.max_supported,
            });
        }
        Ok(())
    }

    fn validate_floor(&self, sdk: &SdkLevels) -> Result<(), ProfileError> {
        let floor = self.table.floor();
        if sdk.min_sdk < floor {
            return Err(ProfileError::ApiLevelBelowFloor {
                field: "minSdk",
                value: sdk.min_sdk,
                floor,
            });
        }
        Ok(())
    }

    fn validate_language(&self, language: &LanguageCompatibility) -> Result<(), ProfileError> {
        let supported = |field: &'static str, value: JavaVersion| {
            if self.table.supports_runtime(value) {
                Ok(())
            } else {
                Err(ProfileError::IncompatibleLanguageRuntime {
                    field,
                    value,
                    detail: format!("supported runtimes: {}", self.runtime_list()),
                })
            }
        };

        supported("sourceCompatibility", language.source_compatibility)?;
        supported("targetCompatibility", language.target_compatibility)?;

        if language.source_compatibility > language.target_compatibility {
            return Err(ProfileError::IncompatibleLanguageRuntime {
                field: "sourceCompatibility",
                value: language.source_compatibility,
                detail: format!(
                    "source level is newer than targetCompatibility ({})",
                    language.target_compatibility
                ),
            });
        }

        if language.jvm_target != language.target_compatibility {
            return Err(ProfileError::IncompatibleLanguageRuntime {
                field: "jvmTarget",
                value: language.jvm_target,
                detail: format!(
                    "Kotlin and Java bytecode targets differ (targetCompatibility = {})",
                    language.target_compatibility
                ),
            });
        }

        Ok(())
    }

    fn runtime_list(&self) -> String {
        self.table
            .runtimes()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Validate against the built-in table.
pub fn validate(candidate: CandidateProfile) -> Result<ValidatedProfile, ProfileError> {
    ConstraintValidator::new(CompatibilityTable::builtin()).validate(candidate)
}
