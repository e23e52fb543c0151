// ── User-visible notifications ──
//
// Operations return a `Notice` instead of raising a toast themselves;
// presentation is left to the caller.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A message/severity pair for the console to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Success notice carrying the backend's `msg`, or `fallback` when it sent none.
    pub(crate) fn from_reply(msg: Option<String>, fallback: &str) -> Self {
        Self::success(msg.unwrap_or_else(|| fallback.to_owned()))
    }
}
