//! CSV export and import of expenses
//!
//! Format: header `date,category,amount,description`, one row per expense,
//! dates as YYYY-MM-DD and amounts as exact decimal strings. Fields are
//! quoted only when they contain a comma, quote, or line break.

use std::io::{Read, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Category, Expense, NewExpense, DATE_FORMAT};

/// Column order of the export header
pub const CSV_HEADER: [&str; 4] = ["date", "category", "amount", "description"];

#[derive(Serialize)]
struct CsvOutRow<'a> {
    date: String,
    category: &'a str,
    amount: String,
    description: &'a str,
}

#[derive(Deserialize)]
struct CsvInRow {
    date: String,
    category: String,
    amount: String,
    #[serde(default)]
    description: String,
}

/// Write expenses as CSV, in the order given
pub fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    // header written explicitly so an empty export still has one
    wtr.write_record(CSV_HEADER)?;

    for expense in expenses {
        wtr.serialize(CsvOutRow {
            date: expense.date.format(DATE_FORMAT).to_string(),
            category: expense.category.as_str(),
            amount: expense.amount.to_string(),
            description: &expense.description,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render expenses as a CSV string
pub fn to_csv_string(expenses: &[Expense]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, expenses)?;
    String::from_utf8(buf).map_err(|e| Error::Storage(format!("CSV output is not UTF-8: {}", e)))
}

/// Parse CSV in the export format back into unsaved expenses
///
/// Every row is validated; the first bad row fails the whole parse with
/// its line number.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewExpense>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    // column names match case-insensitively, ignoring surrounding spaces
    let headers: StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    rdr.set_headers(headers.clone());

    for required in &CSV_HEADER[..3] {
        if !headers.iter().any(|h| h == *required) {
            return Err(Error::InvalidRecord(format!(
                "CSV header is missing the '{}' column",
                required
            )));
        }
    }

    let mut expenses = Vec::new();
    for (index, row) in rdr.deserialize::<CsvInRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = row?;
        let expense = parse_row(&row).map_err(|e| match e {
            Error::InvalidRecord(msg) => Error::InvalidRecord(format!("line {}: {}", line, msg)),
            other => other,
        })?;
        expenses.push(expense);
    }

    Ok(expenses)
}

fn parse_row(row: &CsvInRow) -> Result<NewExpense> {
    let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidRecord(format!("invalid date '{}': {}", row.date, e)))?;
    let category: Category = row.category.parse()?;
    let amount = Decimal::from_str(row.amount.trim())
        .map_err(|e| Error::InvalidRecord(format!("invalid amount '{}': {}", row.amount, e)))?;

    let expense = NewExpense::new(date, category, amount, row.description.clone());
    expense.validate()?;
    Ok(expense)
}
