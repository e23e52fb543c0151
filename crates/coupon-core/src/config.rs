// ── Runtime connection configuration ──
//
// These types describe how to reach the coupon backend. They never touch
// disk: the CLI resolves a profile and hands a `ConsoleConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use coupon_api::{CouponClient, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;
use crate::pagination::DEFAULT_LIMIT;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Configuration for talking to one coupon backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend root (e.g. `http://localhost:5000`).
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Page size used when the caller does not ask for one.
    pub default_limit: u32,
}

impl ConsoleConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Build the HTTP client for this backend.
    pub fn client(&self) -> Result<CouponClient, CoreError> {
        let transport = TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        };
        Ok(CouponClient::new(self.base_url.clone(), &transport)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn client_uses_configured_base_url() {
        let config = ConsoleConfig::new(Url::parse("http://localhost:5000/api/").unwrap());
        let client = config.client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
    }

    #[test]
    fn missing_ca_file_is_a_connection_error() {
        let mut config = ConsoleConfig::new(Url::parse("https://coupons.test").unwrap());
        config.tls = TlsVerification::CustomCa(PathBuf::from("/nonexistent/ca.pem"));

        let err = config.client().unwrap_err();
        assert!(matches!(err, CoreError::ConnectionFailed { .. }));
    }
}
