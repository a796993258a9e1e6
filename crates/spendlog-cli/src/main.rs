//! spendlog CLI - Personal expense tracker
//!
//! Usage:
//!   spendlog init                                   Initialize database
//!   spendlog add --amount 12.50 --category Food     Record an expense
//!   spendlog list --category Food --from .. --to .. List expenses
//!   spendlog summary                                Dashboard totals
//!   spendlog budget --amount 1000                   Compare against a budget
//!   spendlog --memory ...                           Run without saving anything

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use spendlog_core::{Config, ExpenseStore, Ledger, MemoryStore};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Init if cli.memory => {
            println!("In-memory mode: nothing to initialize.");
            Ok(())
        }
        Commands::Categories => commands::cmd_categories(),
        command if cli.memory => {
            debug!("Using in-memory store");
            let ledger = Ledger::open(MemoryStore::new())?;
            run(ledger, command, &config)
        }
        command => {
            let db_path = cli.db.unwrap_or_else(|| config.db_path.clone());
            debug!(db = %db_path.display(), "Using database");
            if let Commands::Init = command {
                return commands::cmd_init(&db_path);
            }
            let ledger = commands::open_ledger(&db_path)?;
            run(ledger, command, &config)
        }
    }
}

/// Run a ledger command against any store
fn run<S: ExpenseStore>(mut ledger: Ledger<S>, command: Commands, config: &Config) -> Result<()> {
    match command {
        // handled before a ledger is opened
        Commands::Init | Commands::Categories => Ok(()),
        Commands::Add {
            amount,
            category,
            note,
            date,
        } => commands::cmd_add(&mut ledger, &amount, &category, &note, date.as_deref()),
        Commands::List {
            filter,
            order,
            limit,
            json,
        } => {
            let filter = commands::build_filter(&filter)?;
            commands::cmd_list(&ledger, &filter, &order, limit, json)
        }
        Commands::Delete { id } => commands::cmd_delete(&mut ledger, id),
        Commands::Summary { filter, json } => {
            let filter = commands::build_filter(&filter)?;
            commands::cmd_summary(&ledger, &filter, json)
        }
        Commands::Report { report_type } => match report_type {
            ReportType::Categories { month, json } => {
                let month = month.as_deref().map(commands::parse_month).transpose()?;
                commands::cmd_report_categories(&ledger, month, json)
            }
            ReportType::Trend { filter, json } => {
                let filter = commands::build_filter(&filter)?;
                commands::cmd_report_trend(&ledger, &filter, json)
            }
            ReportType::Daily { filter, json } => {
                let filter = commands::build_filter(&filter)?;
                commands::cmd_report_daily(&ledger, &filter, json)
            }
        },
        Commands::Budget {
            amount,
            month,
            filter,
        } => {
            let budget = match amount.as_deref() {
                Some(value) => commands::parse_budget(value)?,
                None => config.monthly_budget.context(
                    "No budget given. Pass --amount or set budget.monthly in the config file",
                )?,
            };
            let month = month.as_deref().map(commands::parse_month).transpose()?;
            let filter = commands::build_filter(&filter)?;
            commands::cmd_budget(&ledger, &filter, budget, month)
        }
        Commands::Export { filter, output } => {
            let filter = commands::build_filter(&filter)?;
            commands::cmd_export(&ledger, &filter, output.as_deref())
        }
        Commands::Import { file } => commands::cmd_import(&mut ledger, &file),
    }
}
