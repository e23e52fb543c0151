// Coupon backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and response decoding.
// Every failed response is turned into `Error::Api`, carrying the
// backend's `{ msg }` when the body has one.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    ApplyRequest, ApplyResponse, CouponBody, CouponEnvelope, CouponPage, CouponResponse,
    ListResponse, MessageResponse,
};

/// Async client for the coupon REST API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct CouponClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CouponClient {
    /// Create a client for the backend rooted at `base_url`
    /// (e.g. `http://localhost:5000` or `https://shop.example/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List one page of coupons.
    ///
    /// `GET {base}/coupon?page={page}&limit={limit}`
    pub async fn list_coupons(&self, page: u32, limit: u32) -> Result<CouponPage, Error> {
        let mut url = self.endpoint(&["coupon"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        debug!(page, limit, "listing coupons");
        let resp: ListResponse = self.send(self.http.get(url)).await?;
        Ok(resp.result)
    }

    /// Fetch a single coupon by code.
    ///
    /// `GET {base}/coupon/{code}`
    pub async fn get_coupon(&self, code: &str) -> Result<CouponResponse, Error> {
        let url = self.endpoint(&["coupon", code])?;
        debug!(code, "fetching coupon");
        let resp: CouponEnvelope = self.send(self.http.get(url)).await?;
        Ok(resp.coupon)
    }

    /// Create a coupon.
    ///
    /// `POST {base}/coupon`
    pub async fn create_coupon(&self, body: &CouponBody) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["coupon"])?;
        debug!(code = %body.code, "creating coupon");
        self.send_json(self.http.post(url), body).await
    }

    /// Replace an existing coupon.
    ///
    /// `PUT {base}/coupon/{code}`
    pub async fn update_coupon(
        &self,
        code: &str,
        body: &CouponBody,
    ) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["coupon", code])?;
        debug!(code, "updating coupon");
        self.send_json(self.http.put(url), body).await
    }

    /// Delete a coupon by code.
    ///
    /// `DELETE {base}/coupon/{code}`
    pub async fn delete_coupon(&self, code: &str) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["coupon", code])?;
        debug!(code, "deleting coupon");
        self.send(self.http.delete(url)).await
    }

    /// Compute the discounted price of a product for a user.
    ///
    /// `POST {base}/user/apply_coupon`
    pub async fn apply_coupon(&self, body: &ApplyRequest) -> Result<ApplyResponse, Error> {
        let url = self.endpoint(&["user", "apply_coupon"])?;
        debug!(code = %body.code, user_id = body.user_id, "applying coupon");
        self.send_json(self.http.post(url), body).await
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        self.send(request.json(body)).await
    }

    /// Send a request and decode the body, mapping non-2xx to `Error::Api`.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, Error> {
        let resp = request.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        debug!(%status, url = %resp.url(), "response received");

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&body)
                .ok()
                .and_then(|m| m.msg);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Some mutations answer with an empty 2xx body.
        let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })
    }
}
