//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `open_ledger` - Shared utilities to open storage
//! - `build_filter` - Turn filter flags into an `ExpenseFilter`
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlog_core::models::DATE_FORMAT;
use spendlog_core::{Category, Database, ExpenseFilter, Ledger, YearMonth};
use tracing::warn;

use crate::cli::FilterArgs;

/// Open the SQLite database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Open a ledger over the SQLite database at `db_path`
pub fn open_ledger(db_path: &Path) -> Result<Ledger<Database>> {
    let db = open_db(db_path)?;
    Ledger::open(db).context("Failed to load expenses")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses()?;

    println!("✅ Database initialized successfully! ({} expenses stored)", count);
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: spendlog add --amount 12.50 --category Food --note lunch");
    println!("  2. See the dashboard: spendlog summary");

    Ok(())
}

/// Parse a YYYY-MM-DD date flag
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// Parse a YYYY-MM month flag
pub fn parse_month(value: &str) -> Result<YearMonth> {
    value
        .parse()
        .with_context(|| format!("Invalid --month '{}' (use YYYY-MM)", value))
}

/// Parse a budget amount flag
pub fn parse_budget(value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid budget amount '{}'", value))
}

/// Build an `ExpenseFilter` from command-line flags
///
/// No `--category` flags means every category.
pub fn build_filter(args: &FilterArgs) -> Result<ExpenseFilter> {
    let from = args
        .from
        .as_deref()
        .map(|s| parse_date(s, "--from"))
        .transpose()?;
    let to = args
        .to
        .as_deref()
        .map(|s| parse_date(s, "--to"))
        .transpose()?;

    if from.is_some() != to.is_some() {
        warn!("Both --from and --to are needed for a date range; ignoring the date filter");
    }

    let mut filter = ExpenseFilter::new().from(from).to(to);

    if !args.categories.is_empty() {
        let categories = args
            .categories
            .iter()
            .map(|c| c.parse::<Category>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Invalid --category")?;
        filter = filter.only(categories);
    }

    Ok(filter)
}
