//! Resolution error types and diagnostics.
//!
//! Every error names the offending field(s) and value(s). None of them are
//! retried: they all come from static configuration.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::api_level::ApiLevel;
use crate::core::manifest::MANIFEST_NAME;
use crate::core::runtime::JavaVersion;
use crate::util::diagnostic::Diagnostic;

/// Error during profile resolution, validation, signing or emission.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ProfileError {
    #[error("missing required field `{field}`")]
    #[diagnostic(
        code(buildprofile::resolve::missing_field),
        help("Set the field in the [android] table or supply it from the provider")
    )]
    MissingRequiredField { field: &'static str },

    #[error("invalid {field} `{value}`")]
    #[diagnostic(
        code(buildprofile::resolve::invalid_application_id),
        help("Use reverse-domain segments such as `com.example.app`")
    )]
    InvalidApplicationId { field: &'static str, value: String },

    #[error("invalid SDK ordering: {field} ({value}) < {bound_field} ({bound})")]
    #[diagnostic(
        code(buildprofile::validate::sdk_ordering),
        help("SDK levels must satisfy minSdk <= targetSdk <= compileSdk")
    )]
    InvalidSdkOrdering {
        field: &'static str,
        value: ApiLevel,
        bound_field: &'static str,
        bound: ApiLevel,
    },

    #[error("unsupported API level: {field} = {value}, supported range is {min_supported}..={max_supported}")]
    #[diagnostic(code(buildprofile::validate::unsupported_api_level))]
    UnsupportedApiLevel {
        field: &'static str,
        value: ApiLevel,
        min_supported: ApiLevel,
        max_supported: ApiLevel,
    },

    #[error("API level below platform floor: {field} = {value}, lowest buildable level is {floor}")]
    #[diagnostic(
        code(buildprofile::validate::below_floor),
        help("Embedded native libraries cannot run below the platform floor")
    )]
    ApiLevelBelowFloor {
        field: &'static str,
        value: ApiLevel,
        floor: ApiLevel,
    },

    #[error("incompatible language runtime: {field} = {value}: {detail}")]
    #[diagnostic(code(buildprofile::validate::language_runtime))]
    IncompatibleLanguageRuntime {
        field: &'static str,
        value: JavaVersion,
        detail: String,
    },

    #[error("unresolved signing identity for variant `{variant}`{}", unknown_suffix(.identity))]
    #[diagnostic(
        code(buildprofile::signing::unresolved),
        help("Declare the identity under [signing-configs] or add a [signing-fallbacks] rule")
    )]
    UnresolvedSigningIdentity {
        variant: String,
        identity: Option<String>,
    },

    #[error("signing fallback denied: variant `{variant}` would borrow identity `{identity}`")]
    #[diagnostic(
        code(buildprofile::signing::fallback_denied),
        help("Bind a dedicated identity for the variant, or drop --deny-fallback")
    )]
    SigningFallbackDenied { variant: String, identity: String },

    #[error("unrepresentable value: {field} = {value}: {reason}")]
    #[diagnostic(code(buildprofile::emit::unrepresentable))]
    UnrepresentableValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

fn unknown_suffix(identity: &Option<String>) -> String {
    match identity {
        Some(name) => format!(" (`{}` is not in the signing registry)", name),
        None => String::new(),
    }
}

/// Discriminant of a [`ProfileError`], for matching and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidApplicationId,
    InvalidSdkOrdering,
    UnsupportedApiLevel,
    ApiLevelBelowFloor,
    IncompatibleLanguageRuntime,
    UnresolvedSigningIdentity,
    SigningFallbackDenied,
    UnrepresentableValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingRequiredField => "MissingRequiredField",
            ErrorKind::InvalidApplicationId => "InvalidApplicationId",
            ErrorKind::InvalidSdkOrdering => "InvalidSdkOrdering",
            ErrorKind::UnsupportedApiLevel => "UnsupportedApiLevel",
            ErrorKind::ApiLevelBelowFloor => "ApiLevelBelowFloor",
            ErrorKind::IncompatibleLanguageRuntime => "IncompatibleLanguageRuntime",
            ErrorKind::UnresolvedSigningIdentity => "UnresolvedSigningIdentity",
            ErrorKind::SigningFallbackDenied => "SigningFallbackDenied",
            ErrorKind::UnrepresentableValue => "UnrepresentableValue",
        };
        f.write_str(name)
    }
}

impl ProfileError {
    /// Get the error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            ProfileError::InvalidApplicationId { .. } => ErrorKind::InvalidApplicationId,
            ProfileError::InvalidSdkOrdering { .. } => ErrorKind::InvalidSdkOrdering,
            ProfileError::UnsupportedApiLevel { .. } => ErrorKind::UnsupportedApiLevel,
            ProfileError::ApiLevelBelowFloor { .. } => ErrorKind::ApiLevelBelowFloor,
            ProfileError::IncompatibleLanguageRuntime { .. } => {
                ErrorKind::IncompatibleLanguageRuntime
            }
            ProfileError::UnresolvedSigningIdentity { .. } => ErrorKind::UnresolvedSigningIdentity,
            ProfileError::SigningFallbackDenied { .. } => ErrorKind::SigningFallbackDenied,
            ProfileError::UnrepresentableValue { .. } => ErrorKind::UnrepresentableValue,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProfileError::MissingRequiredField { field } => {
                Diagnostic::error(format!("`{}` has no value", field))
                    .with_context("the field is not set explicitly and the provider does not supply it")
                    .with_suggestion(format!(
                        "Set `{}` in the [android] table of {}",
                        field, MANIFEST_NAME
                    ))
            }

            ProfileError::InvalidApplicationId { field, value } => {
                Diagnostic::error(format!("`{}` is not a valid {}", value, field))
                    .with_context(
                        "expected at least two `.`-separated segments, each starting with a letter",
                    )
                    .with_suggestion("Use a reverse-domain name such as `com.example.app`")
            }

            ProfileError::InvalidSdkOrdering {
                field,
                value,
                bound_field,
                bound,
            } => Diagnostic::error(format!("{} must not be lower than {}", field, bound_field))
                .with_context(format!("{} = {}", field, value))
                .with_context(format!("{} = {}", bound_field, bound))
                .with_suggestion(format!("Raise {} to at least {}", field, bound))
                .with_suggestion(format!("Lower {} to at most {}", bound_field, value)),

            ProfileError::UnsupportedApiLevel {
                field,
                value,
                min_supported,
                max_supported,
            } => Diagnostic::error(format!("{} {} is not supported", field, value))
                .with_context(format!(
                    "supported API levels: {} to {}",
                    min_supported, max_supported
                ))
                .with_suggestion(format!(
                    "Pick a {} between {} and {}",
                    field, min_supported, max_supported
                )),

            ProfileError::ApiLevelBelowFloor { field, value, floor } => {
                Diagnostic::error(format!("{} {} is below the platform floor", field, value))
                    .with_context(format!("the lowest level that still produces working artifacts is {}", floor))
                    .with_suggestion(format!("Raise {} to {} or higher", field, floor))
            }

            ProfileError::IncompatibleLanguageRuntime {
                field,
                value,
                detail,
            } => Diagnostic::error(format!("{} {} is incompatible", field, value))
                .with_context(detail.clone())
                .with_suggestion(
                    "Keep sourceCompatibility <= targetCompatibility and jvmTarget equal to targetCompatibility",
                ),

            ProfileError::UnresolvedSigningIdentity { variant, identity } => {
                let mut diag = Diagnostic::error(format!(
                    "no signing identity for variant `{}`",
                    variant
                ));
                if let Some(name) = identity {
                    diag = diag.with_context(format!(
                        "`{}` is not declared in the signing registry",
                        name
                    ));
                }
                diag.with_suggestion(format!(
                    "Declare [signing-configs.{}] in {}",
                    identity.as_deref().unwrap_or(variant),
                    MANIFEST_NAME
                ))
                .with_suggestion(format!(
                    "Add a fallback rule: [signing-fallbacks] {} = \"debug\"",
                    variant
                ))
            }

            ProfileError::SigningFallbackDenied { variant, identity } => Diagnostic::error(
                format!("variant `{}` would be signed with `{}` through a fallback", variant, identity),
            )
            .with_context("fallback signing is denied for this invocation")
            .with_suggestion(format!(
                "Bind a dedicated identity in [android.signing]: {} = \"<identity>\"",
                variant
            )),

            ProfileError::UnrepresentableValue {
                field,
                value,
                reason,
            } => Diagnostic::error(format!("{} = {} cannot be emitted", field, value))
                .with_context(reason.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_ordering_message_cites_fields() {
        let err = ProfileError::InvalidSdkOrdering {
            field: "targetSdk",
            value: ApiLevel::new(21),
            bound_field: "minSdk",
            bound: ApiLevel::new(23),
        };
        assert_eq!(
            err.to_string(),
            "invalid SDK ordering: targetSdk (21) < minSdk (23)"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidSdkOrdering);
    }

    #[test]
    fn test_unresolved_signing_message() {
        let bare = ProfileError::UnresolvedSigningIdentity {
            variant: "staging".into(),
            identity: None,
        };
        assert_eq!(bare.to_string(), "unresolved signing identity for variant `staging`");

        let named = ProfileError::UnresolvedSigningIdentity {
            variant: "release".into(),
            identity: Some("upload".into()),
        };
        assert!(named.to_string().contains("`upload` is not in the signing registry"));
    }

    #[test]
    fn test_diagnostic_has_suggestions() {
        let err = ProfileError::ApiLevelBelowFloor {
            field: "minSdk",
            value: ApiLevel::new(15),
            floor: ApiLevel::new(21),
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: minSdk 15 is below the platform floor"));
        assert!(output.contains("1. Raise minSdk to 21 or higher"));
    }

    #[test]
    fn test_miette_codes() {
        let err = ProfileError::MissingRequiredField { field: "compileSdk" };
        let code = MietteDiagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("buildprofile::resolve::missing_field"));
    }
}
