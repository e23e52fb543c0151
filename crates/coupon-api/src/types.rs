//! Wire types for the coupon backend.
//!
//! Coupon fields travel in snake_case exactly as the backend stores them;
//! list metadata uses the backend's camelCase. Enumerated values (`type`,
//! `category`) stay as strings here and are interpreted by `coupon-core`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Coupons ─────────────────────────────────────────────────────────

/// One inclusive age range attached to an age-group coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroupBody {
    pub start_age: u32,
    pub end_age: u32,
}

/// A stored coupon, as returned by `GET /coupon/{code}` and inside list pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponResponse {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: String,
    pub discount: f64,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub end_date: Option<NaiveDate>,
    pub category: String,
    /// Only populated for age-group coupons; list rows usually omit it.
    #[serde(default)]
    pub age_groups: Option<Vec<AgeGroupBody>>,
    /// Only populated for DFS coupons.
    #[serde(default)]
    pub dfs: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Envelope of `GET /coupon/{code}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponEnvelope {
    pub coupon: CouponResponse,
}

/// Request body for `POST /coupon` and `PUT /coupon/{code}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponBody {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: String,
    pub discount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: String,
    pub age_groups: Vec<AgeGroupBody>,
    pub dfs: Option<Vec<u32>>,
}

// ── Pagination ───────────────────────────────────────────────────────

/// A `{page, limit}` pair the backend hands out for neighbouring pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: u32,
    pub limit: u32,
}

/// One page of coupons plus the backend's pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPage {
    #[serde(default)]
    pub coupons_list: Vec<CouponResponse>,
    pub current_page: u32,
    pub current_limit: u32,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub previous: Option<PageLink>,
    #[serde(default)]
    pub next: Option<PageLink>,
}

/// Envelope of `GET /coupon?page=&limit=`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub result: CouponPage,
}

// ── Apply ────────────────────────────────────────────────────────────

/// Request body for `POST /user/apply_coupon`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyRequest {
    pub code: String,
    pub product_price: f64,
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplyResponse {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(rename = "discountPrice")]
    pub discount_price: f64,
}

// ── Generic ──────────────────────────────────────────────────────────

/// `{ msg }` body returned by mutations and by every failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Dates arrive either as `YYYY-MM-DD` or as a full ISO-8601 timestamp.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn coupon_accepts_timestamp_dates() {
        let coupon: CouponResponse = serde_json::from_value(serde_json::json!({
            "name": "Spring",
            "code": "SPR24",
            "type": "FLAT",
            "discount": 50,
            "start_date": "2024-03-01T00:00:00.000Z",
            "end_date": null,
            "category": "PLAIN"
        }))
        .unwrap();

        assert_eq!(coupon.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(coupon.end_date, None);
        assert_eq!(coupon.age_groups, None);
    }

    #[test]
    fn page_metadata_is_optional() {
        let page: CouponPage = serde_json::from_value(serde_json::json!({
            "couponsList": [],
            "currentPage": 1,
            "currentLimit": 10
        }))
        .unwrap();

        assert_eq!(page.total_pages, None);
        assert!(page.previous.is_none() && page.next.is_none());
    }

    #[test]
    fn body_sends_explicit_nulls() {
        let body = CouponBody {
            name: "Kids".into(),
            code: "KID5".into(),
            coupon_type: "PERCENTAGE".into(),
            discount: 5.0,
            start_date: None,
            end_date: None,
            category: "AGE_GROUP".into(),
            age_groups: vec![AgeGroupBody { start_age: 0, end_age: 5 }],
            dfs: None,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["type"], "PERCENTAGE");
        assert!(json["start_date"].is_null());
        assert!(json["dfs"].is_null());
        assert_eq!(json["age_groups"][0]["end_age"], 5);
    }
}
