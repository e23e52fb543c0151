//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use coupon_config::ConfigError;
use coupon_core::{CoreError, ValidationReport};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to coupon backend at {url}")]
    #[diagnostic(
        code(coupons::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Use --insecure (-k) for self-signed certificates, or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(coupons::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Coupon '{code}' not found")]
    #[diagnostic(code(coupons::not_found), help("{hint}"))]
    NotFound { code: String, hint: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(coupons::rejected))]
    Rejected { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(coupons::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(coupons::validation))]
    Validation { field: String, reason: String },

    #[error("Coupon input is invalid")]
    #[diagnostic(code(coupons::invalid_input), help("{details}"))]
    InvalidInput { details: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(coupons::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: coupons config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No coupon backend configured")]
    #[diagnostic(
        code(coupons::no_config),
        help(
            "Create a profile with: coupons config init\n\
             Or pass --base-url / set COUPONS_BASE_URL.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(coupons::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(coupons::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidInput { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn invalid(report: &ValidationReport) -> Self {
        Self::InvalidInput {
            details: report
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                identifier,
                message,
                ..
            } => CliError::NotFound {
                code: identifier,
                hint: message.unwrap_or_else(|| "Run: coupons list to see available coupons".into()),
            },

            CoreError::Rejected { message, .. } => CliError::Rejected { message },

            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                CliError::ApiError { message }
            }

            CoreError::Invalid(report) => CliError::invalid(&report),

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use coupon_core::{FieldError, ValidationReport};

    use super::*;

    #[test]
    fn validation_failures_are_usage_errors() {
        let report = ValidationReport {
            errors: vec![
                FieldError {
                    field: "name",
                    message: "name cannot be empty".into(),
                },
                FieldError {
                    field: "dfs",
                    message: "DFS format is not correct".into(),
                },
            ],
        };
        let err = CliError::from(CoreError::Invalid(report));

        assert_eq!(err.exit_code(), exit_code::USAGE);
        let CliError::InvalidInput { details } = err else {
            panic!("expected InvalidInput");
        };
        assert_eq!(details, "name: name cannot be empty\ndfs: DFS format is not correct");
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        let not_found = CoreError::NotFound {
            entity_type: "Coupon".into(),
            identifier: "NOPE".into(),
            message: None,
        };
        assert_eq!(CliError::from(not_found).exit_code(), exit_code::NOT_FOUND);
        let rejected = CoreError::Rejected {
            message: "Coupon code already exists".into(),
            status: 409,
        };
        assert_eq!(CliError::from(rejected).exit_code(), exit_code::GENERAL);
    }
}
