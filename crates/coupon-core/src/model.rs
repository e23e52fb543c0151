// ── Coupon domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How the discount amount is interpreted by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CouponType {
    Flat,
    Percentage,
}

/// Who a coupon applies to. Drives which sub-fields the form requires.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CouponCategory {
    Plain,
    AgeGroup,
    Dfs,
}

/// Inclusive age range; `end_age >= start_age` is guaranteed by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub start_age: u32,
    pub end_age: u32,
}

/// A coupon as stored by the backend.
///
/// `coupon_type` and `category` are `None` when the backend reports a
/// value this console does not know.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coupon {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: Option<CouponType>,
    pub discount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<CouponCategory>,
    pub age_groups: Vec<AgeGroup>,
    pub dfs: Vec<u32>,
}
