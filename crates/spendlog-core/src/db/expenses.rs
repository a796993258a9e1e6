//! Expense operations

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Category, Expense, NewExpense, DATE_FORMAT};
use crate::store::ExpenseStore;

const EXPENSE_COLUMNS: &str = "id, date, category, amount, note";

impl Database {
    /// Insert an expense and return its new ID
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (date, category, amount, note) VALUES (?, ?, ?, ?)",
            params![
                expense.date.format(DATE_FORMAT).to_string(),
                expense.category.as_str(),
                expense.amount.to_string(),
                expense.description,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all expenses in insertion order
    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY id ASC",
            EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map([], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Get a single expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS),
                params![id],
                Self::row_to_expense,
            )
            .optional()?;
        Ok(expense)
    }

    /// Delete an expense by ID
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Count stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete every expense. Returns the number removed.
    pub fn clear_expenses(&self) -> Result<usize> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM expenses", [])?)
    }

    fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        let date_str: String = row.get(1)?;
        let category_str: String = row.get(2)?;
        let amount_str: String = row.get(3)?;

        let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
            .map_err(|e| conversion_error(1, e))?;
        let category: Category = category_str.parse().map_err(|e| conversion_error(2, e))?;
        let amount = Decimal::from_str(&amount_str).map_err(|e| conversion_error(3, e))?;

        Ok(Expense {
            id: row.get(0)?,
            date,
            category,
            amount,
            description: row.get(4)?,
        })
    }
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

impl ExpenseStore for Database {
    fn create(&mut self, expense: &NewExpense) -> Result<i64> {
        self.insert_expense(expense)
    }

    fn read_all(&self) -> Result<Vec<Expense>> {
        self.list_expenses()
    }

    fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.delete_expense(id)
    }
}
