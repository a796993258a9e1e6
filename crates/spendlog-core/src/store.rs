//! Persistence adapters
//!
//! The ledger writes through to an `ExpenseStore` on every mutation.
//! `MemoryStore` keeps expenses for the lifetime of the process;
//! `Database` (see `crate::db`) keeps them in SQLite.

use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};

/// Durable storage for expenses
pub trait ExpenseStore {
    /// Store a new expense and return its assigned id
    fn create(&mut self, expense: &NewExpense) -> Result<i64>;

    /// Read every stored expense in insertion order
    fn read_all(&self) -> Result<Vec<Expense>>;

    /// Delete an expense, failing with `Error::NotFound` if the id is unknown
    fn delete_by_id(&mut self, id: i64) -> Result<()>;
}

/// Session-lifetime store backed by a vector
#[derive(Debug, Clone)]
pub struct MemoryStore {
    expenses: Vec<Expense>,
    /// Ids are never reused, even after deletion
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore for MemoryStore {
    fn create(&mut self, expense: &NewExpense) -> Result<i64> {
        let id = self.next_id;
        self.next_id += 1;
        self.expenses.push(Expense::from_new(id, expense.clone()));
        Ok(id)
    }

    fn read_all(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn delete_by_id(&mut self, id: i64) -> Result<()> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::NotFound(id))?;
        self.expenses.remove(index);
        Ok(())
    }
}
