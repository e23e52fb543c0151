//! CLI configuration: thin wrapper around `coupon_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --insecure, --timeout).

use coupon_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use coupon_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build a `ConsoleConfig` from the config file, profile, and CLI overrides.
///
/// Flags take priority over profile values. Without a matching profile,
/// `--base-url` alone is enough.
pub fn resolve_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile {
            base_url: global.base_url.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?,
            ca_cert: None,
            insecure: None,
            timeout: None,
            limit: None,
        },
    };

    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    tracing::debug!(profile = %profile_name, base_url = %profile.base_url, "resolved backend");
    Ok(coupon_config::profile_to_console_config(&profile, &cfg.defaults)?)
}
