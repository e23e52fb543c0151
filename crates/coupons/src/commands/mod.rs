//! Command dispatch: bridges CLI args -> coupon-core -> output formatting.
//!
//! Handlers validate local input before resolving a backend, so invalid
//! forms fail fast without configuration or network access.

pub mod apply;
pub mod config_cmd;
pub mod coupons;
pub mod edit;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => coupons::list(&args, global).await,
        Command::Show { code } => coupons::show(&code, global).await,
        Command::Delete { code, page } => coupons::delete(&code, &page, global).await,
        Command::Create(args) => edit::create(&args, global).await,
        Command::Update {
            code,
            form,
            clear_age_groups,
        } => edit::update(&code, &form, clear_age_groups, global).await,
        Command::Apply(args) => apply::handle(args, global).await,
        // Local-only commands are handled before dispatch
        Command::GenerateCode { .. } | Command::Config(_) | Command::Completions(_) => {
            unreachable!()
        }
    }
}
