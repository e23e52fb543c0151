// ── Backend seam ──
//
// Everything in this crate talks to the backend through `CouponApi`, so
// the form and list logic can run against an in-memory stand-in.
// `CouponClient` implements it over HTTP.

use async_trait::async_trait;
use coupon_api::CouponClient;
use coupon_api::types::{ApplyRequest, CouponBody};

use crate::apply::{ApplyOutcome, ApplyPayload};
use crate::error::CoreError;
use crate::form::CouponPayload;
use crate::list::ListView;
use crate::model::Coupon;
use crate::notice::Notice;
use crate::pagination::PageQuery;

/// Operations the console performs against the coupon backend.
///
/// Mutations return the backend's `msg`, if any.
#[async_trait]
pub trait CouponApi: Send + Sync {
    async fn list_coupons(&self, query: PageQuery) -> Result<ListView, CoreError>;

    /// Any answered failure is reported as [`CoreError::NotFound`].
    async fn get_coupon(&self, code: &str) -> Result<Coupon, CoreError>;

    async fn create_coupon(&self, payload: &CouponPayload) -> Result<Option<String>, CoreError>;

    async fn update_coupon(
        &self,
        code: &str,
        payload: &CouponPayload,
    ) -> Result<Option<String>, CoreError>;

    async fn delete_coupon(&self, code: &str) -> Result<Option<String>, CoreError>;

    async fn apply_coupon(&self, payload: &ApplyPayload) -> Result<ApplyOutcome, CoreError>;
}

#[async_trait]
impl CouponApi for CouponClient {
    async fn list_coupons(&self, query: PageQuery) -> Result<ListView, CoreError> {
        let page = CouponClient::list_coupons(self, query.page, query.limit).await?;
        Ok(ListView::from(page))
    }

    async fn get_coupon(&self, code: &str) -> Result<Coupon, CoreError> {
        match CouponClient::get_coupon(self, code).await {
            Ok(coupon) => Ok(Coupon::from(coupon)),
            Err(coupon_api::Error::Api { message, .. }) => Err(CoreError::NotFound {
                entity_type: "Coupon".into(),
                identifier: code.into(),
                message,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_coupon(&self, payload: &CouponPayload) -> Result<Option<String>, CoreError> {
        let resp = CouponClient::create_coupon(self, &CouponBody::from(payload)).await?;
        Ok(resp.msg)
    }

    async fn update_coupon(
        &self,
        code: &str,
        payload: &CouponPayload,
    ) -> Result<Option<String>, CoreError> {
        let resp = CouponClient::update_coupon(self, code, &CouponBody::from(payload)).await?;
        Ok(resp.msg)
    }

    async fn delete_coupon(&self, code: &str) -> Result<Option<String>, CoreError> {
        let resp = CouponClient::delete_coupon(self, code).await?;
        Ok(resp.msg)
    }

    async fn apply_coupon(&self, payload: &ApplyPayload) -> Result<ApplyOutcome, CoreError> {
        let resp = CouponClient::apply_coupon(self, &ApplyRequest::from(payload)).await?;
        Ok(ApplyOutcome {
            notice: resp.msg.map(Notice::success),
            discount_price: resp.discount_price,
        })
    }
}
