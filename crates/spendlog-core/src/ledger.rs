//! The expense ledger
//!
//! A `Ledger` owns a store and an in-memory snapshot of its expenses.
//! Every mutation writes through to the store first; the snapshot only
//! changes once the store reports success, so a failed call leaves the
//! ledger exactly as it was.
//!
//! Mutations take `&mut self`, so at most one is in flight per ledger.

use std::cmp::Reverse;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseForm, NewExpense};
use crate::store::ExpenseStore;

/// Ordering for `Ledger::list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Date descending; same-day expenses most recently added first
    #[default]
    NewestFirst,
    /// Date ascending; same-day expenses in the order they were added
    OldestFirst,
    /// Amount descending; ties most recently added first
    LargestFirst,
    /// Amount ascending; ties most recently added first
    SmallestFirst,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewestFirst => "newest",
            Self::OldestFirst => "oldest",
            Self::LargestFirst => "largest",
            Self::SmallestFirst => "smallest",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" | "date-desc" => Ok(Self::NewestFirst),
            "oldest" | "date-asc" => Ok(Self::OldestFirst),
            "largest" | "amount-desc" => Ok(Self::LargestFirst),
            "smallest" | "amount-asc" => Ok(Self::SmallestFirst),
            _ => Err(format!(
                "Unknown order: {}. Available: newest, oldest, largest, smallest",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authoritative collection of expenses backed by a store
#[derive(Debug)]
pub struct Ledger<S: ExpenseStore> {
    store: S,
    /// Insertion order
    expenses: Vec<Expense>,
}

impl<S: ExpenseStore> Ledger<S> {
    /// Load every expense the store already holds
    pub fn open(store: S) -> Result<Self> {
        let expenses = store.read_all()?;
        info!(count = expenses.len(), "Ledger opened");
        Ok(Self { store, expenses })
    }

    /// Validate, store, and append a new expense
    pub fn add(&mut self, new: NewExpense) -> Result<Expense> {
        new.validate()?;

        let id = self.store.create(&new).map_err(|e| {
            warn!(error = %e, "Store rejected new expense");
            e
        })?;

        if self.expenses.iter().any(|e| e.id == id) {
            // undo the row just written so store and snapshot still agree
            if let Err(e) = self.store.delete_by_id(id) {
                warn!(id, error = %e, "Could not roll back duplicate id");
            }
            return Err(Error::Storage(format!(
                "store assigned duplicate id {}",
                id
            )));
        }

        let expense = Expense::from_new(id, new);
        debug!(id, amount = %expense.amount, category = %expense.category, "Expense added");
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Handle an add-expense form submission
    pub fn on_add_submit(&mut self, form: &ExpenseForm) -> Result<Expense> {
        self.on_add_submit_at(form, Local::now().date_naive())
    }

    /// Handle a form submission, using `today` when the form has no date
    pub fn on_add_submit_at(&mut self, form: &ExpenseForm, today: NaiveDate) -> Result<Expense> {
        let new = form.parse(today)?;
        self.add(new)
    }

    /// Permanently delete an expense
    ///
    /// Unknown ids fail with `Error::NotFound` and change nothing.
    pub fn delete(&mut self, id: i64) -> Result<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::NotFound(id))?;

        self.store.delete_by_id(id).map_err(|e| {
            warn!(id, error = %e, "Store rejected delete");
            e
        })?;

        let removed = self.expenses.remove(index);
        debug!(id, "Expense deleted");
        Ok(removed)
    }

    pub fn get(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// All expenses in the requested order
    pub fn list(&self, order: SortOrder) -> Vec<Expense> {
        // newest insertion first, then a stable sort keeps that as the tiebreak
        let mut expenses: Vec<Expense> = self.expenses.iter().rev().cloned().collect();

        match order {
            SortOrder::NewestFirst => expenses.sort_by_key(|e| Reverse(e.date)),
            SortOrder::OldestFirst => {
                expenses.reverse();
                expenses.sort_by_key(|e| e.date);
            }
            SortOrder::LargestFirst => expenses.sort_by_key(|e| Reverse(e.amount)),
            SortOrder::SmallestFirst => expenses.sort_by_key(|e| e.amount),
        }

        expenses
    }

    /// Expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the ledger and hand back its store
    pub fn into_store(self) -> S {
        self.store
    }
}
