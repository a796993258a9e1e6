//! spendlog Core Library
//!
//! Shared functionality for the spendlog personal expense tracker:
//! - Expense, category and summary models
//! - Ledger with write-through persistence
//! - In-memory and SQLite expense stores
//! - Pure filtering and spending aggregation
//! - CSV export and import
//! - TOML configuration

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod filter;
pub mod ledger;
pub mod models;
pub mod store;
pub mod summary;

/// Test utilities including a store that fails on demand
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use filter::{CategorySelection, ExpenseFilter};
pub use ledger::{Ledger, SortOrder};
pub use models::{
    BudgetStatus, Category, CategoryTotal, DailyCategoryTotal, DashboardStats, Expense,
    ExpenseForm, NewExpense, YearMonth,
};
pub use store::{ExpenseStore, MemoryStore};
