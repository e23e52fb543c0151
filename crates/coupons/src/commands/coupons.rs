//! Coupon list / show / delete handlers.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::Tabled;

use coupon_core::{
    Coupon, CouponDetail, CouponListCoordinator, ListView, PageQuery, Pagination,
};

use crate::cli::{GlobalOpts, OutputFormat, PageArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CouponRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    coupon_type: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Valid")]
    valid: String,
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

impl From<&Coupon> for CouponRow {
    fn from(c: &Coupon) -> Self {
        Self {
            code: c.code.clone(),
            name: c.name.clone(),
            coupon_type: or_dash(c.coupon_type),
            discount: c.discount.to_string(),
            category: or_dash(c.category),
            valid: format!("{} → {}", or_dash(c.start_date), or_dash(c.end_date)),
        }
    }
}

pub(crate) fn detail(c: &Coupon) -> String {
    let mut lines = vec![
        format!("Code:       {}", c.code),
        format!("Name:       {}", c.name),
        format!("Type:       {}", or_dash(c.coupon_type)),
        format!("Discount:   {}", c.discount),
        format!("Category:   {}", or_dash(c.category)),
        format!("Start date: {}", or_dash(c.start_date)),
        format!("End date:   {}", or_dash(c.end_date)),
    ];
    if !c.age_groups.is_empty() {
        let groups: Vec<_> = c
            .age_groups
            .iter()
            .map(|g| format!("{}-{}", g.start_age, g.end_age))
            .collect();
        lines.push(format!("Age groups: {}", groups.join(", ")));
    }
    if !c.dfs.is_empty() {
        let days: Vec<_> = c.dfs.iter().map(u32::to_string).collect();
        lines.push(format!("DFS:        {}", days.join(",")));
    }
    lines.join("\n")
}

// ── Pagination footer ───────────────────────────────────────────────

/// `Page 2 of 5 (47 coupons)  ‹ 1 [2] 3 4 5 ›` built from the page metadata.
fn footer(view: &ListView, color: bool) -> String {
    let page = &view.page;
    let nav = Pagination::new(page);

    let mut summary = format!("Page {}", page.current_page);
    if let Some(total_pages) = page.total_pages {
        summary.push_str(&format!(" of {total_pages}"));
    }
    if let Some(total) = page.total {
        summary.push_str(&format!(" ({total} coupons)"));
    }

    let mut controls = Vec::new();
    if let Some(prev) = nav.previous() {
        controls.push(format!("‹ --page {}", prev.page));
    }
    for index in nav.indices() {
        let label = if nav.is_current(index) {
            let current = format!("[{index}]");
            if color { current.bold().to_string() } else { current }
        } else {
            index.to_string()
        };
        controls.push(label);
    }
    if let Some(next) = nav.next() {
        controls.push(format!("--page {} ›", next.page));
    }

    if controls.is_empty() {
        summary
    } else {
        format!("{summary}  {}", controls.join(" "))
    }
}

fn render_view(view: &ListView, global: &GlobalOpts) {
    let out = match global.output {
        OutputFormat::Table => {
            let table = output::render_list(
                &global.output,
                &view.coupons,
                |c| CouponRow::from(c),
                |c| c.code.clone(),
            );
            let nav = footer(view, output::should_color(&global.color));
            format!("{table}\n{nav}")
        }
        OutputFormat::Plain => output::render_list(
            &global.output,
            &view.coupons,
            |c| CouponRow::from(c),
            |c| c.code.clone(),
        ),
        _ => output::render_single(&global.output, view, |_| String::new(), |_| String::new()),
    };
    output::print_output(&out, global.quiet);
}

/// The page the user asked for, falling back to the profile's page size.
fn requested_page(args: &PageArgs, default_limit: u32) -> PageQuery {
    let mut query = PageQuery::from_raw(args.page.as_deref(), args.limit.as_deref());
    if args.limit.is_none() {
        query.limit = default_limit;
    }
    query
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(args: &PageArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (console, client) = util::connect(global)?;
    let coordinator = CouponListCoordinator::new(Arc::new(client));

    coordinator
        .fetch_page(requested_page(args, console.default_limit))
        .await?;
    render_view(&coordinator.view(), global);
    Ok(())
}

pub async fn show(code: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let (_, client) = util::connect(global)?;

    match CouponDetail::load(&client, code).await? {
        CouponDetail::Loaded(coupon) => {
            let out = output::render_single(&global.output, &coupon, detail, |c| c.code.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
        CouponDetail::NotFound { notice } => Err(CliError::NotFound {
            code: code.into(),
            hint: notice.map_or_else(
                || "Run: coupons list to see available coupons".into(),
                |n| n.message,
            ),
        }),
    }
}

pub async fn delete(code: &str, page: &PageArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (console, client) = util::connect(global)?;
    let coordinator = CouponListCoordinator::new(Arc::new(client));

    // The page being viewed; it is refetched once the coupon is gone.
    coordinator
        .fetch_page(requested_page(page, console.default_limit))
        .await?;

    if !util::confirm(&format!("Delete coupon '{code}'?"), "delete", global.yes)? {
        return Ok(());
    }

    let deleted = coordinator.delete_coupon(code).await?;
    output::print_notice(
        &deleted.notice,
        global.quiet,
        output::should_color(&global.color),
    );
    deleted.refresh?;
    render_view(&coordinator.view(), global);
    Ok(())
}
