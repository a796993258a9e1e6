//! Domain models for spendlog

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Labels offered by the add-expense form, in display order
pub const PRESET_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Other",
];

/// Largest amount a single expense may carry (one trillion)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Date format used everywhere dates cross a text boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Expense category
///
/// The five preset categories are closed variants. Any other label,
/// including the preset "Other", is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Other(label) => label,
        }
    }

    /// Whether this is one of the preset categories (the "Other" preset included)
    pub fn is_preset(&self) -> bool {
        match self {
            Self::Other(label) => label == "Other",
            _ => true,
        }
    }

    /// All preset categories in form order
    pub fn presets() -> Vec<Category> {
        PRESET_CATEGORIES
            .iter()
            .filter_map(|label| label.parse().ok())
            .collect()
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        if label.is_empty() {
            return Err(Error::InvalidRecord("category is required".to_string()));
        }

        Ok(match label.to_lowercase().as_str() {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "shopping" => Self::Shopping,
            "bills" => Self::Bills,
            "entertainment" => Self::Entertainment,
            "other" => Self::Other("Other".to_string()),
            _ => Self::Other(label.to_string()),
        })
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned by the store at creation
    pub id: i64,
    pub date: NaiveDate,
    pub category: Category,
    /// Always greater than zero
    pub amount: Decimal,
    pub description: String,
}

impl Expense {
    pub fn from_new(id: i64, new: NewExpense) -> Self {
        Self {
            id,
            date: new.date,
            category: new.category,
            amount: new.amount,
            description: new.description,
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// An expense before it has been stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
}

impl NewExpense {
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    /// Check the record invariants: amount in `(0, MAX_AMOUNT]`, non-empty category
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidRecord(format!(
                "amount must be greater than zero (got {})",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(Error::InvalidRecord(format!(
                "amount must be at most {} (got {})",
                MAX_AMOUNT, self.amount
            )));
        }
        if self.category.as_str().trim().is_empty() {
            return Err(Error::InvalidRecord("category is required".to_string()));
        }
        Ok(())
    }
}

/// Raw add-expense form input, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    /// YYYY-MM-DD; today when absent
    pub date: Option<String>,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl ExpenseForm {
    /// Convert the form into a validated `NewExpense`
    pub fn parse(&self, today: NaiveDate) -> Result<NewExpense> {
        let date = match self.date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| Error::InvalidRecord(format!("invalid date '{}': {}", s, e)))?,
            _ => today,
        };

        let amount = self.amount.trim();
        let amount = Decimal::from_str(amount)
            .map_err(|e| Error::InvalidRecord(format!("invalid amount '{}': {}", amount, e)))?;

        let new = NewExpense::new(
            date,
            self.category.parse()?,
            amount,
            self.description.trim(),
        );
        new.validate()?;
        Ok(new)
    }
}

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRecord(format!("invalid month '{}' (use YYYY-MM)", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
    pub count: usize,
    /// Share of the grand total, 0-100
    pub percentage: Decimal,
}

/// Spending for one category on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCategoryTotal {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Decimal,
}

/// Headline numbers for the dashboard cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub expense_count: usize,
    pub total: Decimal,
    pub top_category: Option<Category>,
    pub highest_expense: Option<Decimal>,
}

/// Spending measured against a budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Decimal,
    pub total: Decimal,
    /// total / budget
    pub ratio: Decimal,
    pub over_budget: bool,
    /// budget - total; negative when over budget
    pub remaining: Decimal,
}

impl BudgetStatus {
    /// Ratio clamped to 0..=1 for progress bars
    pub fn progress(&self) -> Decimal {
        self.ratio.clamp(Decimal::ZERO, Decimal::ONE)
    }
}
