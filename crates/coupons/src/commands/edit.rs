//! Coupon create / update handlers and code generation.

use coupon_core::{
    AgeField, AgeGroupEditor, CouponCategory, CouponDetail, CouponField, CouponForm, CouponType,
    ValidationReport, generate_code,
};

use crate::cli::{CategoryArg, CouponFormArgs, CouponTypeArg, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

impl From<CouponTypeArg> for CouponType {
    fn from(arg: CouponTypeArg) -> Self {
        match arg {
            CouponTypeArg::Flat => Self::Flat,
            CouponTypeArg::Percentage => Self::Percentage,
        }
    }
}

impl From<CategoryArg> for CouponCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Plain => Self::Plain,
            CategoryArg::AgeGroup => Self::AgeGroup,
            CategoryArg::Dfs => Self::Dfs,
        }
    }
}

/// Split `START-END` into its two ages. Either side may be blank; the
/// editor reports missing ages itself.
fn parse_age_range(raw: &str) -> Result<(Option<i64>, Option<i64>), CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "age-group".into(),
        reason,
    };
    let (start, end) = raw
        .split_once('-')
        .ok_or_else(|| invalid(format!("expected START-END, got '{raw}'")))?;

    let age = |s: &str| -> Result<Option<i64>, CliError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        s.parse()
            .map(Some)
            .map_err(|_| invalid(format!("'{s}' is not a whole number")))
    };
    Ok((age(start)?, age(end)?))
}

/// Copy the given flags into the form. Absent flags leave the draft as is.
fn fill(form: &mut CouponForm, args: &CouponFormArgs) -> Result<(), CliError> {
    let text_fields: [(&Option<String>, fn(String) -> CouponField); 6] = [
        (&args.name, CouponField::Name),
        (&args.code, CouponField::Code),
        (&args.discount, CouponField::Discount),
        (&args.start_date, CouponField::StartDate),
        (&args.end_date, CouponField::EndDate),
        (&args.dfs, CouponField::Dfs),
    ];
    for (value, field) in text_fields {
        if let Some(value) = value {
            form.set_field(field(value.clone()));
        }
    }

    if let Some(coupon_type) = args.coupon_type {
        form.set_type(coupon_type.into());
    }
    if let Some(category) = args.category {
        form.set_category(category.into());
    }

    let mut editor = AgeGroupEditor::new();
    for raw in &args.age_groups {
        let (start, end) = parse_age_range(raw)?;
        editor.begin();
        editor.input(AgeField::StartAge, start);
        editor.input(AgeField::EndAge, end);
        form.commit_age_group(&mut editor)
            .map_err(|errors| CliError::invalid(&errors.into()))?;
    }

    if args.generate_code {
        form.generate_code();
    }
    Ok(())
}

pub async fn create(args: &CouponFormArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut form = CouponForm::new();
    fill(&mut form, args)?;

    let payload = form
        .validate()
        .map_err(|errors| CliError::invalid(&ValidationReport::from(errors)))?;

    let (_, client) = util::connect(global)?;
    let notice = form.submit(&client).await?;

    output::print_notice(&notice, global.quiet, output::should_color(&global.color));
    output::print_output(&payload.code, global.quiet);
    Ok(())
}

pub async fn update(
    code: &str,
    args: &CouponFormArgs,
    clear_age_groups: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (_, client) = util::connect(global)?;

    let coupon = match CouponDetail::load(&client, code).await? {
        CouponDetail::Loaded(coupon) => coupon,
        CouponDetail::NotFound { notice } => {
            return Err(CliError::NotFound {
                code: code.into(),
                hint: notice.map_or_else(
                    || "Run: coupons list to see available coupons".into(),
                    |n| n.message,
                ),
            });
        }
    };

    let mut form = CouponForm::edit(&coupon);
    if clear_age_groups {
        while form.remove_age_group(0).is_some() {}
    }
    fill(&mut form, args)?;

    let notice = form.submit(&client).await?;
    output::print_notice(&notice, global.quiet, output::should_color(&global.color));
    output::print_output(form.draft().code.trim(), global.quiet);
    Ok(())
}

/// Print `count` random codes, one per line.
pub fn generate(count: u32, global: &GlobalOpts) {
    let codes: Vec<String> = (0..count).map(|_| generate_code()).collect();
    output::print_output(&codes.join("\n"), global.quiet);
}
