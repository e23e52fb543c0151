// ── Core error types ──
//
// User-facing errors from coupon-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<coupon_api::Error>`
// impl translates transport-layer errors into this taxonomy.

use thiserror::Error;

use crate::notice::Notice;
use crate::validation::ValidationReport;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach coupon backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to coupon backend timed out")]
    Timeout,

    // ── Backend answers ──────────────────────────────────────────────
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
        /// The backend's `msg`, when it sent one.
        message: Option<String>,
    },

    /// The backend refused the request and explained why.
    #[error("{message}")]
    Rejected { message: String, status: u16 },

    /// The backend failed without a usable message.
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Client-side validation ───────────────────────────────────────
    #[error("Validation failed: {0}")]
    Invalid(ValidationReport),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message the backend attached to this failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::NotFound { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The notification a console shows for this failure.
    ///
    /// `None` when the backend gave no message; such failures are only logged.
    pub fn notice(&self) -> Option<Notice> {
        self.server_message().map(Notice::error)
    }

    /// Returns `true` if the backend actually answered (non-2xx), as
    /// opposed to the request never completing.
    pub fn has_response(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Rejected { .. } | Self::Api { status: Some(_), .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<coupon_api::Error> for CoreError {
    fn from(err: coupon_api::Error) -> Self {
        match err {
            coupon_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            coupon_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            coupon_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            coupon_api::Error::Api {
                status,
                message: Some(message),
            } => CoreError::Rejected { message, status },
            coupon_api::Error::Api {
                status,
                message: None,
            } => CoreError::Api {
                message: format!("backend answered HTTP {status}"),
                status: Some(status),
            },
            coupon_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
