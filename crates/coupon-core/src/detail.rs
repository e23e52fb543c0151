// ── Single-coupon view ──

use serde::Serialize;
use tracing::info;

use crate::api::CouponApi;
use crate::error::CoreError;
use crate::model::Coupon;
use crate::notice::Notice;

/// What the view-coupon screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CouponDetail {
    Loaded(Coupon),
    /// The backend answered with an error; the console redirects to its
    /// not-found page, showing the backend's message if there was one.
    NotFound { notice: Option<Notice> },
}

impl CouponDetail {
    /// Fetch one coupon.
    ///
    /// Requests that never got an answer (connection failures, timeouts)
    /// are returned as errors rather than as `NotFound`.
    pub async fn load(api: &dyn CouponApi, code: &str) -> Result<Self, CoreError> {
        match api.get_coupon(code).await {
            Ok(coupon) => Ok(Self::Loaded(coupon)),
            Err(e) if e.has_response() => {
                info!(code, error = %e, "coupon not found");
                Ok(Self::NotFound { notice: e.notice() })
            }
            Err(e) => Err(e),
        }
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        match self {
            Self::Loaded(coupon) => Some(coupon),
            Self::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::testing::StubApi;

    #[tokio::test]
    async fn existing_coupon_is_loaded() {
        let api = StubApi::with_codes(3);
        let detail = CouponDetail::load(&api, "C002").await.unwrap();
        assert_eq!(detail.coupon().map(|c| c.code.as_str()), Some("C002"));
    }

    #[tokio::test]
    async fn missing_coupon_redirects_with_message() {
        let api = StubApi::with_codes(1);
        let detail = CouponDetail::load(&api, "NOPE").await.unwrap();
        assert_eq!(
            detail,
            CouponDetail::NotFound {
                notice: Some(Notice::error("Coupon not found")),
            }
        );
    }

    #[tokio::test]
    async fn backend_rejection_is_not_found() {
        let api = StubApi::with_codes(1);
        api.reject_with("invalid code");
        let detail = CouponDetail::load(&api, "C001").await.unwrap();
        assert!(detail.coupon().is_none());
    }
}
