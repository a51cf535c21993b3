//! CLI command implementations
//!
//! - `convert` - Convert an export and write it to a file or stdout
//! - `summary` - Print balances, per-type counts and diagnostics

pub mod convert;
pub mod summary;

pub use convert::*;
pub use summary::*;

use anyhow::{Context, Result};
use mbankcz_core::Settings;

use crate::cli::SettingsArgs;

/// Resolve settings: `--config` file or default location, then flag overrides
pub fn resolve_settings(args: &SettingsArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load().context("Failed to load settings")?,
    };

    if let Some(currency) = &args.currency {
        settings.currency = currency.clone();
    }
    if let Some(bank) = &args.bank {
        settings.bank = bank.clone();
    }
    if let Some(account) = &args.account {
        settings.account = account.clone();
    }
    if let Some(account_type) = &args.account_type {
        settings.account_type = account_type.to_uppercase();
    }
    if let Some(charset) = &args.charset {
        settings.charset = charset.clone();
    }

    Ok(settings)
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
