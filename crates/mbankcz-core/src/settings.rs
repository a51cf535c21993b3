//! Converter settings
//!
//! Settings are loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/mbankcz/config/settings.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Values found in the export itself (currency, account number) win over
//! whatever is configured here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/settings.toml");

/// Caller-supplied defaults for a conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    pub bank: String,
    pub account: String,
    pub account_type: String,
    /// Code page of the input file (any WHATWG encoding label)
    pub charset: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "CZK".to_string(),
            bank: "BREXCZPP".to_string(),
            account: String::new(),
            account_type: "CHECKING".to_string(),
            charset: "cp1250".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load settings from an explicit file
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse settings from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("mbankcz").join("config").join("settings.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<Settings> {
    let path = match override_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::InvalidConfig(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => default_config_path().filter(|p| p.exists()),
    };

    let content = match path {
        Some(path) => {
            debug!("Loading settings from {}", path.display());
            fs::read_to_string(&path)
                .map_err(|e| Error::InvalidConfig(format!("Failed to read config: {}", e)))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    statement: Option<RawStatement>,
    input: Option<RawInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStatement {
    currency: Option<String>,
    bank: Option<String>,
    account: Option<String>,
    account_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInput {
    charset: Option<String>,
}

fn parse_config(content: &str) -> Result<Settings> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidConfig(format!("Invalid config TOML: {}", e)))?;

    let mut settings = Settings::default();

    if let Some(statement) = raw.statement {
        if let Some(currency) = statement.currency {
            settings.currency = currency;
        }
        if let Some(bank) = statement.bank {
            settings.bank = bank;
        }
        if let Some(account) = statement.account {
            settings.account = account;
        }
        if let Some(account_type) = statement.account_type {
            settings.account_type = account_type;
        }
    }

    if let Some(input) = raw.input {
        if let Some(charset) = input.charset {
            settings.charset = charset;
        }
    }

    Ok(settings)
}
