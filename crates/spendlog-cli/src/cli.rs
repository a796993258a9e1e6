//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// spendlog - Track where your money goes
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Personal expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides storage.db_path from the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Keep expenses in memory only (nothing is saved)
    #[arg(long, global = true)]
    pub memory: bool,

    /// Config file path (defaults to $SPENDLOG_CONFIG, then ~/.config/spendlog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a new expense
    Add {
        /// Amount spent (must be greater than zero)
        #[arg(short, long)]
        amount: String,

        /// Category: Food, Transport, Shopping, Bills, Entertainment, Other, or any label
        #[arg(short, long)]
        category: String,

        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort order: newest, oldest, largest, smallest
        #[arg(long, default_value = "newest")]
        order: String,

        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an expense permanently
    Delete {
        /// Expense ID to delete
        id: i64,
    },

    /// Show dashboard summary (totals, top category, highest spend)
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Compare spending against a budget
    Budget {
        /// Budget amount (defaults to budget.monthly from the config file)
        #[arg(short, long)]
        amount: Option<String>,

        /// Only count expenses in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export expenses to CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import expenses from a CSV file in the export format
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the preset categories
    Categories,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending by category
    Categories {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly spending trend
    Trend {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Daily spending by category
    Daily {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Filters shared by list, summary, reports and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only these categories (repeat for several)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Start date (YYYY-MM-DD), needs --to
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), needs --from
    #[arg(long)]
    pub to: Option<String>,
}
