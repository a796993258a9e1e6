//! Test utilities for spendlog-core
//!
//! `FailingStore` wraps a `MemoryStore` and can be told to fail its next
//! write (or every read), for exercising the ledger's write-through
//! guarantees.

use std::cell::Cell;

use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};
use crate::store::{ExpenseStore, MemoryStore};

#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_next_write: Cell<bool>,
    fail_reads: Cell<bool>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` or `delete_by_id` fail
    pub fn fail_next_write(&self) {
        self.fail_next_write.set(true);
    }

    /// Make every `read_all` fail (or succeed again)
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// What the underlying store actually holds
    pub fn stored(&self) -> Vec<Expense> {
        self.inner.read_all().unwrap_or_default()
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_next_write.replace(false) {
            return Err(Error::Storage("simulated write failure".to_string()));
        }
        Ok(())
    }
}

impl ExpenseStore for FailingStore {
    fn create(&mut self, expense: &NewExpense) -> Result<i64> {
        self.check_write()?;
        self.inner.create(expense)
    }

    fn read_all(&self) -> Result<Vec<Expense>> {
        if self.fail_reads.get() {
            return Err(Error::Storage("simulated read failure".to_string()));
        }
        self.inner.read_all()
    }

    fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.check_write()?;
        self.inner.delete_by_id(id)
    }
}
