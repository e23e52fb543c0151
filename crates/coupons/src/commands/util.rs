//! Shared helpers for command handlers.

use coupon_core::{ConsoleConfig, CouponClient};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Resolve the backend from config + flags and build its client.
pub fn connect(global: &GlobalOpts) -> Result<(ConsoleConfig, CouponClient), CliError> {
    let console = config::resolve_console_config(global)?;
    let client = console.client()?;
    Ok((console, client))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
