// coupon-core: Form validation, pagination and list coordination for the coupon console.

pub mod age_group;
pub mod api;
pub mod apply;
pub mod config;
pub mod convert;
pub mod detail;
pub mod error;
pub mod form;
pub mod list;
pub mod model;
pub mod notice;
pub mod pagination;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use coupon_api::CouponClient;

pub use age_group::{AgeField, AgeGroupEditor, EditorState, PendingAgeGroup};
pub use api::CouponApi;
pub use apply::{ApplyField, ApplyForm, ApplyOutcome, ApplyPayload};
pub use config::{ConsoleConfig, TlsVerification};
pub use detail::CouponDetail;
pub use error::CoreError;
pub use form::{
    CODE_LENGTH, CouponDraft, CouponField, CouponForm, CouponPayload, DfsError, FormField,
    FormMode, generate_code, parse_dfs,
};
pub use list::{CouponListCoordinator, Deleted, FetchOutcome, ListView};
pub use model::{AgeGroup, Coupon, CouponCategory, CouponType};
pub use notice::{Notice, Severity};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, Page, PageQuery, Pagination, index_window};
pub use validation::{FieldError, FieldErrors, ValidationReport};
