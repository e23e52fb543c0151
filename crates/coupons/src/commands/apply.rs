use coupon_core::{ApplyField, ApplyForm, ApplyOutcome, ValidationReport};

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(outcome: &ApplyOutcome) -> String {
    format!("Discounted price: {}", outcome.discount_price)
}

pub async fn handle(args: ApplyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut form = ApplyForm::new();
    form.set(ApplyField::Code, args.code);
    form.set(ApplyField::ProductPrice, args.price);
    form.set(ApplyField::UserId, args.user_id);

    form.validate()
        .map_err(|errors| CliError::invalid(&ValidationReport::from(errors)))?;

    let (_, client) = util::connect(global)?;
    let outcome = form.submit(&client).await?;

    if let Some(ref notice) = outcome.notice {
        output::print_notice(notice, global.quiet, output::should_color(&global.color));
    }
    let out = output::render_single(&global.output, &outcome, detail, |o| {
        o.discount_price.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
