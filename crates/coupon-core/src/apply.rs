// ── Apply-coupon form ──
//
// Computes a user's discounted price for a product. All three inputs are
// required before the request is issued.

use serde::Serialize;
use strum::IntoStaticStr;
use tracing::{info, warn};

use crate::api::CouponApi;
use crate::error::CoreError;
use crate::notice::Notice;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ApplyField {
    Code,
    ProductPrice,
    UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyPayload {
    pub code: String,
    pub product_price: f64,
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyOutcome {
    pub notice: Option<Notice>,
    pub discount_price: f64,
}

/// Raw apply-coupon inputs plus the errors from the last validation.
#[derive(Debug, Clone, Default)]
pub struct ApplyForm {
    code: String,
    product_price: String,
    user_id: String,
    errors: FieldErrors<ApplyField>,
}

impl ApplyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ApplyField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ApplyField::Code => self.code = value,
            ApplyField::ProductPrice => self.product_price = value,
            ApplyField::UserId => self.user_id = value,
        }
    }

    pub fn errors(&self) -> &FieldErrors<ApplyField> {
        &self.errors
    }

    pub fn validate(&mut self) -> Result<ApplyPayload, FieldErrors<ApplyField>> {
        let mut errors = FieldErrors::new();

        let code = self.code.trim();
        if code.is_empty() {
            errors.insert(ApplyField::Code, "code cannot be empty");
        }

        let product_price = self
            .product_price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0);
        if product_price.is_none() {
            errors.insert(ApplyField::ProductPrice, "Product price cannot be empty");
        }

        let user_id = self.user_id.trim().parse::<u64>().ok();
        if user_id.is_none() {
            errors.insert(ApplyField::UserId, "User id cannot be empty");
        }

        let result = match (product_price, user_id) {
            (Some(product_price), Some(user_id)) if errors.is_empty() => Ok(ApplyPayload {
                code: code.to_owned(),
                product_price,
                user_id,
            }),
            _ => Err(errors),
        };
        match &result {
            Ok(_) => self.errors.clear(),
            Err(errors) => self.errors.clone_from(errors),
        }
        result
    }

    pub async fn submit(&mut self, api: &dyn CouponApi) -> Result<ApplyOutcome, CoreError> {
        let payload = self
            .validate()
            .map_err(|errors| CoreError::Invalid(errors.into()))?;

        match api.apply_coupon(&payload).await {
            Ok(outcome) => {
                info!(
                    code = %payload.code,
                    user_id = payload.user_id,
                    discount_price = outcome.discount_price,
                    "coupon applied"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(code = %payload.code, error = %e, "apply coupon failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::testing::StubApi;

    #[test]
    fn empty_form_reports_all_three_fields() {
        let mut form = ApplyForm::new();
        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [
                (ApplyField::Code, "code cannot be empty"),
                (ApplyField::ProductPrice, "Product price cannot be empty"),
                (ApplyField::UserId, "User id cannot be empty"),
            ]
        );
    }

    #[test]
    fn non_numeric_inputs_are_rejected() {
        let mut form = ApplyForm::new();
        form.set(ApplyField::Code, "SAVE10");
        form.set(ApplyField::ProductPrice, "-3");
        form.set(ApplyField::UserId, "7.5");

        let errors = form.validate().unwrap_err();
        assert!(!errors.contains(ApplyField::Code));
        assert!(errors.contains(ApplyField::ProductPrice));
        assert!(errors.contains(ApplyField::UserId));
    }

    #[tokio::test]
    async fn valid_form_is_submitted() {
        let api = StubApi::default();
        let mut form = ApplyForm::new();
        form.set(ApplyField::Code, " SAVE10 ");
        form.set(ApplyField::ProductPrice, "200");
        form.set(ApplyField::UserId, "7");

        let outcome = form.submit(&api).await.unwrap();

        assert_eq!(api.calls(), ["apply SAVE10"]);
        assert_eq!(outcome.notice, Some(Notice::success("Coupon applied")));
        assert!((outcome.discount_price - 180.0).abs() < 1e-9);
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let api = StubApi::default();
        let mut form = ApplyForm::new();
        form.set(ApplyField::Code, "SAVE10");

        assert!(matches!(form.submit(&api).await, Err(CoreError::Invalid(_))));
        assert!(api.calls().is_empty());
    }
}
