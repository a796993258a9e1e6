//! Configuration file loading
//!
//! Settings live in a small TOML file:
//!
//! ```toml
//! [storage]
//! db_path = "spendlog.db"
//!
//! [budget]
//! monthly = "1000"
//! ```
//!
//! A missing file is not an error; defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable that points at an alternate config file
pub const CONFIG_ENV: &str = "SPENDLOG_CONFIG";

/// Database file used when nothing else is configured
pub const DEFAULT_DB_PATH: &str = "spendlog.db";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Budget used by `budget` when none is given on the command line
    pub monthly_budget: Option<Decimal>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            monthly_budget: None,
        }
    }
}

impl Config {
    /// Load configuration: explicit path, then `SPENDLOG_CONFIG`, then the
    /// platform config directory
    ///
    /// An explicit path must exist; the other two may be absent.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);

        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config file");
        parse_config(&content)
    }
}

/// Default config location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spendlog").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    budget: Option<RawBudget>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    db_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    monthly: Option<Decimal>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(db_path) = raw.storage.and_then(|s| s.db_path) {
        config.db_path = db_path;
    }

    if let Some(monthly) = raw.budget.and_then(|b| b.monthly) {
        if monthly <= Decimal::ZERO {
            return Err(Error::Config(format!(
                "budget.monthly must be greater than zero (got {})",
                monthly
            )));
        }
        config.monthly_budget = Some(monthly);
    }

    Ok(config)
}
