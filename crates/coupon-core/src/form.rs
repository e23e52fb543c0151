// ── Coupon form model ──
//
// Owns the draft coupon and its field-level error map. Text inputs are
// held exactly as typed and only interpreted by `validate`, which checks
// every rule before deciding validity so that all problems surface at once.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use strum::IntoStaticStr;
use tracing::{debug, info, warn};

use crate::age_group::{AgeField, AgeGroupEditor};
use crate::api::CouponApi;
use crate::error::CoreError;
use crate::model::{AgeGroup, Coupon, CouponCategory, CouponType};
use crate::notice::Notice;
use crate::validation::FieldErrors;

/// Length of codes produced by [`generate_code`], and the maximum code length.
pub const CODE_LENGTH: usize = 6;

const CODE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Field identifiers ────────────────────────────────────────────────

/// Keys of the form's error map. Names match the backend's field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    Name,
    Code,
    Type,
    Discount,
    StartDate,
    EndDate,
    Category,
    Dfs,
    AgeGroups,
}

/// A single text-field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponField {
    Name(String),
    Code(String),
    Discount(String),
    StartDate(String),
    EndDate(String),
    Dfs(String),
}

// ── Draft ────────────────────────────────────────────────────────────

/// Raw, unvalidated form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponDraft {
    pub name: String,
    pub code: String,
    pub coupon_type: Option<CouponType>,
    pub discount: String,
    pub start_date: String,
    pub end_date: String,
    pub category: Option<CouponCategory>,
    pub age_groups: Vec<AgeGroup>,
    pub dfs: String,
}

impl From<&Coupon> for CouponDraft {
    fn from(coupon: &Coupon) -> Self {
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        Self {
            name: coupon.name.clone(),
            code: coupon.code.clone(),
            coupon_type: coupon.coupon_type,
            discount: coupon.discount.to_string(),
            start_date: date(coupon.start_date),
            end_date: date(coupon.end_date),
            category: coupon.category,
            age_groups: coupon.age_groups.clone(),
            dfs: coupon
                .dfs
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// The validated request body for create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponPayload {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub discount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: CouponCategory,
    pub age_groups: Vec<AgeGroup>,
    pub dfs: Option<Vec<u32>>,
}

// ── DFS parsing ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DfsError {
    #[error("DFS cannot be empty")]
    Empty,
    #[error("DFS entry {position} is empty")]
    Missing { position: usize },
    #[error("DFS entry '{0}' is not a number")]
    NotANumber(String),
    #[error("DFS entry '{0}' is negative")]
    Negative(String),
}

/// Parse a comma-separated list of non-negative integers.
///
/// A single trailing comma is tolerated when it is the last character;
/// any other empty entry is not.
pub fn parse_dfs(raw: &str) -> Result<Vec<u32>, DfsError> {
    if raw.trim().is_empty() {
        return Err(DfsError::Empty);
    }
    let body = raw.strip_suffix(',').unwrap_or(raw);
    body.split(',')
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            if token.is_empty() {
                return Err(DfsError::Missing { position: i + 1 });
            }
            match token.parse::<i64>() {
                Ok(n) if n < 0 => Err(DfsError::Negative(token.to_owned())),
                Ok(n) => u32::try_from(n).map_err(|_| DfsError::NotANumber(token.to_owned())),
                Err(_) => Err(DfsError::NotANumber(token.to_owned())),
            }
        })
        .collect()
}

// ── Code generation ──────────────────────────────────────────────────

/// A random [`CODE_LENGTH`]-character code over `[0-9A-Za-z]`.
///
/// Uniqueness is not checked; the backend rejects duplicates.
pub fn generate_code() -> String {
    generate_code_with(&mut rand::thread_rng())
}

pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
        .collect()
}

// ── Form ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the stored coupon whose code was `original_code`.
    Edit { original_code: String },
}

#[derive(Debug, Clone)]
pub struct CouponForm {
    mode: FormMode,
    draft: CouponDraft,
    errors: FieldErrors<FormField>,
}

impl Default for CouponForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CouponForm {
    /// An empty form for creating a coupon.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CouponDraft::default(),
            errors: FieldErrors::new(),
        }
    }

    /// A form seeded from a stored coupon; submitting it updates that coupon.
    pub fn edit(coupon: &Coupon) -> Self {
        Self {
            mode: FormMode::Edit {
                original_code: coupon.code.clone(),
            },
            draft: CouponDraft::from(coupon),
            errors: FieldErrors::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &CouponDraft {
        &self.draft
    }

    /// Errors from the most recent validation.
    pub fn errors(&self) -> &FieldErrors<FormField> {
        &self.errors
    }

    pub fn set_field(&mut self, update: CouponField) {
        let draft = &mut self.draft;
        match update {
            CouponField::Name(v) => draft.name = v,
            CouponField::Code(v) => draft.code = v,
            CouponField::Discount(v) => draft.discount = v,
            CouponField::StartDate(v) => draft.start_date = v,
            CouponField::EndDate(v) => draft.end_date = v,
            CouponField::Dfs(v) => draft.dfs = v,
        }
    }

    pub fn set_type(&mut self, coupon_type: CouponType) {
        self.draft.coupon_type = Some(coupon_type);
    }

    pub fn set_category(&mut self, category: CouponCategory) {
        self.draft.category = Some(category);
    }

    /// Promote the editor's pending entry into this draft's age groups.
    pub fn commit_age_group(
        &mut self,
        editor: &mut AgeGroupEditor,
    ) -> Result<Option<AgeGroup>, FieldErrors<AgeField>> {
        editor.commit(&mut self.draft.age_groups)
    }

    pub fn remove_age_group(&mut self, index: usize) -> Option<AgeGroup> {
        (index < self.draft.age_groups.len()).then(|| self.draft.age_groups.remove(index))
    }

    /// Replace the code with a freshly generated one.
    pub fn generate_code(&mut self) -> &str {
        self.draft.code = generate_code();
        &self.draft.code
    }

    /// Check every rule against the draft.
    ///
    /// The error map is replaced with the outcome: empty on success, one
    /// entry per violated field otherwise.
    pub fn validate(&mut self) -> Result<CouponPayload, FieldErrors<FormField>> {
        let result = validate_draft(&self.draft);
        match &result {
            Ok(_) => self.errors.clear(),
            Err(errors) => self.errors.clone_from(errors),
        }
        result
    }

    /// Validate, then create or update the coupon.
    ///
    /// Validation failures never reach the network and are returned as
    /// [`CoreError::Invalid`]. A successful create resets the draft.
    pub async fn submit(&mut self, api: &dyn CouponApi) -> Result<Notice, CoreError> {
        let payload = self
            .validate()
            .map_err(|errors| CoreError::Invalid(errors.into()))?;

        let reply = match &self.mode {
            FormMode::Create => api.create_coupon(&payload).await,
            FormMode::Edit { original_code } => api.update_coupon(original_code, &payload).await,
        };

        match reply {
            Ok(msg) => {
                info!(code = %payload.code, mode = ?self.mode, "coupon saved");
                if self.mode == FormMode::Create {
                    self.draft = CouponDraft::default();
                }
                let fallback = match self.mode {
                    FormMode::Create => "Coupon created",
                    FormMode::Edit { .. } => "Coupon updated",
                };
                Ok(Notice::from_reply(msg, fallback))
            }
            Err(e) => {
                warn!(code = %payload.code, error = %e, "coupon submission failed");
                Err(e)
            }
        }
    }
}

fn validate_draft(draft: &CouponDraft) -> Result<CouponPayload, FieldErrors<FormField>> {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert(FormField::Name, "name cannot be empty");
    }

    let code = draft.code.trim();
    if code.is_empty() {
        errors.insert(FormField::Code, "code cannot be empty");
    } else if code.chars().count() > CODE_LENGTH {
        errors.insert(FormField::Code, "code cannot be more than 6 characters");
    }

    if draft.coupon_type.is_none() {
        errors.insert(FormField::Type, "type cannot be empty");
    }

    let discount = check_discount(&draft.discount, &mut errors);

    let start_date = parse_date(&draft.start_date);
    let end_date = parse_date(&draft.end_date);
    if start_date.is_err() {
        errors.insert(FormField::StartDate, "start date is not a valid date");
    }
    if end_date.is_err() {
        errors.insert(FormField::EndDate, "end date is not a valid date");
    }
    if let (Ok(Some(start)), Ok(Some(end))) = (start_date, end_date) {
        if end < start {
            errors.insert(
                FormField::StartDate,
                "start date cannot be greater than end date",
            );
        }
    }

    let mut dfs = None;
    match draft.category {
        None => errors.insert(FormField::Category, "category cannot be empty"),
        Some(CouponCategory::Dfs) => match parse_dfs(&draft.dfs) {
            Ok(days) => dfs = Some(days),
            Err(DfsError::Empty) => errors.insert(FormField::Dfs, "DFS cannot be empty"),
            Err(e) => {
                debug!(error = %e, "rejecting DFS input");
                errors.insert(FormField::Dfs, "DFS format is not correct");
            }
        },
        Some(CouponCategory::AgeGroup) if draft.age_groups.is_empty() => {
            errors.insert(FormField::AgeGroups, "At least 1 age group should be present");
        }
        Some(_) => {}
    }

    match (draft.coupon_type, discount, draft.category, start_date, end_date) {
        (Some(coupon_type), Some(discount), Some(category), Ok(start_date), Ok(end_date))
            if errors.is_empty() =>
        {
            let age_groups = if category == CouponCategory::AgeGroup {
                draft.age_groups.clone()
            } else {
                Vec::new()
            };
            Ok(CouponPayload {
                name: name.to_owned(),
                code: code.to_owned(),
                coupon_type,
                discount,
                start_date,
                end_date,
                category,
                age_groups,
                dfs,
            })
        }
        _ => Err(errors),
    }
}

fn check_discount(raw: &str, errors: &mut FieldErrors<FormField>) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(FormField::Discount, "discount cannot be empty");
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        // Zero reads as "not filled in".
        Ok(v) if v.is_finite() && v >= 0.0 => {
            errors.insert(FormField::Discount, "discount cannot be empty");
            None
        }
        _ => {
            errors.insert(FormField::Discount, "discount must be a positive number");
            None
        }
    }
}

/// Empty input is an absent date.
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::age_group::AgeField;
    use crate::api::testing::StubApi;

    fn filled(category: CouponCategory) -> CouponForm {
        let mut form = CouponForm::new();
        form.set_field(CouponField::Name("Spring sale".into()));
        form.set_field(CouponField::Code("SPR24".into()));
        form.set_field(CouponField::Discount("15".into()));
        form.set_type(CouponType::Percentage);
        form.set_category(category);
        form
    }

    fn add_group(form: &mut CouponForm, start: i64, end: i64) {
        let mut editor = AgeGroupEditor::new();
        editor.begin();
        editor.input(AgeField::StartAge, Some(start));
        editor.input(AgeField::EndAge, Some(end));
        form.commit_age_group(&mut editor).unwrap();
    }

    // ── Validation ───────────────────────────────────────────────────

    #[test]
    fn empty_form_reports_every_field() {
        let mut form = CouponForm::new();
        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            [
                FormField::Name,
                FormField::Code,
                FormField::Type,
                FormField::Discount,
                FormField::Category,
            ]
        );
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn all_violations_are_collected_together() {
        let mut form = CouponForm::new();
        form.set_field(CouponField::Name("   ".into()));
        form.set_field(CouponField::Code("TOOLONG1".into()));
        form.set_field(CouponField::Discount("-5".into()));
        form.set_field(CouponField::StartDate("2024-05-10".into()));
        form.set_field(CouponField::EndDate("2024-05-01".into()));
        form.set_field(CouponField::Dfs("1,x".into()));
        form.set_type(CouponType::Flat);
        form.set_category(CouponCategory::Dfs);

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(FormField::Name), Some("name cannot be empty"));
        assert_eq!(
            errors.get(FormField::Code),
            Some("code cannot be more than 6 characters")
        );
        assert_eq!(
            errors.get(FormField::Discount),
            Some("discount must be a positive number")
        );
        assert_eq!(
            errors.get(FormField::StartDate),
            Some("start date cannot be greater than end date")
        );
        assert_eq!(errors.get(FormField::Dfs), Some("DFS format is not correct"));
    }

    #[test]
    fn zero_discount_counts_as_empty() {
        let mut form = filled(CouponCategory::Plain);
        form.set_field(CouponField::Discount("0".into()));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Discount), Some("discount cannot be empty"));
    }

    #[test]
    fn malformed_dates_are_reported() {
        let mut form = filled(CouponCategory::Plain);
        form.set_field(CouponField::StartDate("yesterday".into()));
        form.set_field(CouponField::EndDate("2024-02-30".into()));
        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.get(FormField::StartDate),
            Some("start date is not a valid date")
        );
        assert_eq!(errors.get(FormField::EndDate), Some("end date is not a valid date"));
    }

    #[test]
    fn age_group_category_requires_groups() {
        let mut form = filled(CouponCategory::AgeGroup);
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(FormField::AgeGroups),
            Some("At least 1 age group should be present")
        );
    }

    #[test]
    fn dfs_category_requires_input() {
        let mut form = filled(CouponCategory::Dfs);
        form.set_field(CouponField::Dfs("  ".into()));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Dfs), Some("DFS cannot be empty"));
    }

    #[test]
    fn successful_validation_clears_errors() {
        let mut form = CouponForm::new();
        assert!(form.validate().is_err());

        let mut form = filled(CouponCategory::Plain);
        form.validate().unwrap();
        assert!(form.errors().is_empty());
    }

    // ── DFS parsing ──────────────────────────────────────────────────

    #[test]
    fn dfs_trailing_comma_is_tolerated() {
        assert_eq!(parse_dfs("1,2,3,"), Ok(vec![1, 2, 3]));
        assert_eq!(parse_dfs("1,2,3"), Ok(vec![1, 2, 3]));
        assert_eq!(parse_dfs(" 0, 4 ,6 "), Ok(vec![0, 4, 6]));
        assert_eq!(parse_dfs("1,2,3 ,"), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn dfs_rejects_bad_entries() {
        assert_eq!(parse_dfs("1,-2,3"), Err(DfsError::Negative("-2".into())));
        assert_eq!(parse_dfs("1,,3"), Err(DfsError::Missing { position: 2 }));
        assert_eq!(parse_dfs("1,2,,"), Err(DfsError::Missing { position: 3 }));
        // Only a comma in the very last position is dropped.
        assert_eq!(parse_dfs("1,2,3, "), Err(DfsError::Missing { position: 4 }));
        assert_eq!(parse_dfs("1.5"), Err(DfsError::NotANumber("1.5".into())));
        assert_eq!(parse_dfs(""), Err(DfsError::Empty));
    }

    // ── Payload ──────────────────────────────────────────────────────

    #[test]
    fn age_group_payload_keeps_sequence() {
        let mut form = filled(CouponCategory::AgeGroup);
        add_group(&mut form, 0, 5);
        add_group(&mut form, 6, 10);
        form.set_field(CouponField::Dfs("1,2".into()));

        let payload = form.validate().unwrap();

        assert_eq!(
            payload.age_groups,
            [
                AgeGroup { start_age: 0, end_age: 5 },
                AgeGroup { start_age: 6, end_age: 10 },
            ]
        );
        assert_eq!(payload.dfs, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["category"], "AGE_GROUP");
        assert_eq!(json["type"], "PERCENTAGE");
        assert!(json["dfs"].is_null());
        assert_eq!(json["age_groups"][1]["end_age"], 10);
    }

    #[test]
    fn dfs_payload_sends_parsed_days() {
        let mut form = filled(CouponCategory::Dfs);
        add_group(&mut form, 1, 2);
        form.set_field(CouponField::Dfs("1,3,5,".into()));

        let payload = form.validate().unwrap();

        assert_eq!(payload.dfs, Some(vec![1, 3, 5]));
        assert!(payload.age_groups.is_empty());
    }

    #[test]
    fn payload_trims_text_and_parses_dates() {
        let mut form = filled(CouponCategory::Plain);
        form.set_field(CouponField::Name("  Spring sale ".into()));
        form.set_field(CouponField::Code(" SPR24 ".into()));
        form.set_field(CouponField::StartDate("2024-03-01".into()));

        let payload = form.validate().unwrap();

        assert_eq!(payload.name, "Spring sale");
        assert_eq!(payload.code, "SPR24");
        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(payload.end_date, None);
    }

    #[test]
    fn remove_age_group_by_index() {
        let mut form = filled(CouponCategory::AgeGroup);
        add_group(&mut form, 0, 5);
        add_group(&mut form, 6, 10);

        assert_eq!(
            form.remove_age_group(0),
            Some(AgeGroup { start_age: 0, end_age: 5 })
        );
        assert_eq!(form.remove_age_group(4), None);
        assert_eq!(form.draft().age_groups.len(), 1);
    }

    // ── Code generation ──────────────────────────────────────────────

    #[test]
    fn generated_codes_use_alphabet() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_code_with(&mut StdRng::seed_from_u64(7));
        let b = generate_code_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn form_generate_code_overwrites() {
        let mut form = filled(CouponCategory::Plain);
        let code = form.generate_code().to_owned();
        assert_ne!(code, "SPR24");
        assert_eq!(form.draft().code, code);
    }

    // ── Submission ───────────────────────────────────────────────────

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let api = StubApi::default();
        let mut form = CouponForm::new();

        let err = form.submit(&api).await.unwrap_err();

        assert!(matches!(err, CoreError::Invalid(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn create_resets_draft_on_success() {
        let api = StubApi::default();
        let mut form = filled(CouponCategory::Plain);

        let notice = form.submit(&api).await.unwrap();

        assert_eq!(notice, Notice::success("Coupon created"));
        assert_eq!(api.calls(), ["create SPR24"]);
        assert_eq!(form.draft(), &CouponDraft::default());
    }

    #[tokio::test]
    async fn rejection_keeps_draft_and_surfaces_message() {
        let api = StubApi::default();
        api.reject_with("Coupon code already exists");
        let mut form = filled(CouponCategory::Plain);

        let err = form.submit(&api).await.unwrap_err();

        assert_eq!(err.notice(), Some(Notice::error("Coupon code already exists")));
        assert_eq!(form.draft().code, "SPR24");
    }

    #[tokio::test]
    async fn edit_submits_update_under_original_code() {
        let api = StubApi::default();
        let stored = Coupon {
            name: "Weekend".into(),
            code: "WKND".into(),
            coupon_type: Some(CouponType::Flat),
            discount: 20.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 6),
            end_date: None,
            category: Some(CouponCategory::Dfs),
            age_groups: Vec::new(),
            dfs: vec![6, 7],
        };
        let mut form = CouponForm::edit(&stored);
        assert_eq!(form.draft().dfs, "6,7");
        assert_eq!(form.draft().discount, "20");
        assert_eq!(form.draft().start_date, "2024-01-06");

        form.set_field(CouponField::Code("WKND2".into()));
        let notice = form.submit(&api).await.unwrap();

        assert_eq!(notice, Notice::success("Coupon updated"));
        assert_eq!(api.calls(), ["update WKND -> WKND2"]);
        assert_eq!(form.draft().code, "WKND2");
    }
}
