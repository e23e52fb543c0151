// ── Wire ↔ domain conversions ──
//
// `From` impls between coupon-api wire types and coupon-core domain types.
// Enumerated strings are parsed here; values this console does not know
// are kept as `None` and logged rather than failing the whole response.

use std::str::FromStr;

use coupon_api::types::{
    AgeGroupBody, ApplyRequest, CouponBody, CouponPage, CouponResponse, PageLink,
};
use tracing::warn;

use crate::apply::ApplyPayload;
use crate::form::CouponPayload;
use crate::list::ListView;
use crate::model::{AgeGroup, Coupon, CouponCategory, CouponType};
use crate::pagination::{Page, PageQuery};

fn parse_known<T: FromStr>(raw: &str, what: &str, code: &str) -> Option<T> {
    let parsed = T::from_str(raw).ok();
    if parsed.is_none() {
        warn!(code, value = raw, "unknown coupon {what}");
    }
    parsed
}

impl From<AgeGroupBody> for AgeGroup {
    fn from(b: AgeGroupBody) -> Self {
        Self {
            start_age: b.start_age,
            end_age: b.end_age,
        }
    }
}

impl From<AgeGroup> for AgeGroupBody {
    fn from(g: AgeGroup) -> Self {
        Self {
            start_age: g.start_age,
            end_age: g.end_age,
        }
    }
}

impl From<CouponResponse> for Coupon {
    fn from(r: CouponResponse) -> Self {
        let coupon_type: Option<CouponType> = parse_known(&r.coupon_type, "type", &r.code);
        let category: Option<CouponCategory> = parse_known(&r.category, "category", &r.code);
        Self {
            name: r.name,
            code: r.code,
            coupon_type,
            discount: r.discount,
            start_date: r.start_date,
            end_date: r.end_date,
            category,
            age_groups: r
                .age_groups
                .unwrap_or_default()
                .into_iter()
                .map(AgeGroup::from)
                .collect(),
            dfs: r.dfs.unwrap_or_default(),
        }
    }
}

impl From<PageLink> for PageQuery {
    fn from(l: PageLink) -> Self {
        Self::new(l.page, l.limit)
    }
}

impl From<CouponPage> for ListView {
    fn from(p: CouponPage) -> Self {
        Self {
            page: Page {
                current_page: p.current_page,
                current_limit: p.current_limit,
                total_pages: p.total_pages,
                total: p.total,
                previous: p.previous.map(PageQuery::from),
                next: p.next.map(PageQuery::from),
            },
            coupons: p.coupons_list.into_iter().map(Coupon::from).collect(),
        }
    }
}

impl From<&CouponPayload> for CouponBody {
    fn from(p: &CouponPayload) -> Self {
        Self {
            name: p.name.clone(),
            code: p.code.clone(),
            coupon_type: <&'static str>::from(p.coupon_type).to_owned(),
            discount: p.discount,
            start_date: p.start_date,
            end_date: p.end_date,
            category: <&'static str>::from(p.category).to_owned(),
            age_groups: p.age_groups.iter().copied().map(AgeGroupBody::from).collect(),
            dfs: p.dfs.clone(),
        }
    }
}

impl From<&ApplyPayload> for ApplyRequest {
    fn from(p: &ApplyPayload) -> Self {
        Self {
            code: p.code.clone(),
            product_price: p.product_price,
            user_id: p.user_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn response(coupon_type: &str, category: &str) -> CouponResponse {
        CouponResponse {
            name: "Kids".into(),
            code: "KID5".into(),
            coupon_type: coupon_type.into(),
            discount: 5.0,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: None,
            category: category.into(),
            age_groups: Some(vec![AgeGroupBody {
                start_age: 0,
                end_age: 5,
            }]),
            dfs: None,
            created_at: None,
        }
    }

    #[test]
    fn response_to_domain() {
        let coupon = Coupon::from(response("FLAT", "AGE_GROUP"));

        assert_eq!(coupon.coupon_type, Some(CouponType::Flat));
        assert_eq!(coupon.category, Some(CouponCategory::AgeGroup));
        assert_eq!(coupon.age_groups, [AgeGroup { start_age: 0, end_age: 5 }]);
        assert!(coupon.dfs.is_empty());
    }

    #[test]
    fn unknown_enum_values_become_none() {
        let coupon = Coupon::from(response("BOGO", "VIP"));
        assert_eq!(coupon.coupon_type, None);
        assert_eq!(coupon.category, None);
        assert_eq!(coupon.code, "KID5");
    }

    #[test]
    fn page_metadata_carries_over() {
        let view = ListView::from(CouponPage {
            coupons_list: vec![response("PERCENTAGE", "PLAIN")],
            current_page: 2,
            current_limit: 1,
            total_pages: Some(3),
            total: Some(3),
            previous: Some(PageLink { page: 1, limit: 1 }),
            next: None,
        });

        assert_eq!(view.page.previous, Some(PageQuery::new(1, 1)));
        assert_eq!(view.page.next, None);
        assert_eq!(view.coupons.len(), 1);
    }

    #[test]
    fn payload_to_body_uses_wire_names() {
        let payload = CouponPayload {
            name: "Weekdays".into(),
            code: "WEEK1".into(),
            coupon_type: CouponType::Percentage,
            discount: 12.5,
            start_date: None,
            end_date: None,
            category: CouponCategory::Dfs,
            age_groups: Vec::new(),
            dfs: Some(vec![1, 2, 3]),
        };
        let body = CouponBody::from(&payload);

        assert_eq!(body.coupon_type, "PERCENTAGE");
        assert_eq!(body.category, "DFS");
        assert_eq!(body.dfs, Some(vec![1, 2, 3]));
    }
}
