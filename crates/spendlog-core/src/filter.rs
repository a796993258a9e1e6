//! Expense filter builder
//!
//! Narrows a snapshot of expenses by category and inclusive date range.
//! Filtering is pure: the input slice is never modified and the result
//! keeps input order.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Category, Expense};

/// Which categories a filter lets through
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No category restriction (the unset state)
    #[default]
    All,
    /// Only these categories. An empty list matches nothing.
    Only(Vec<Category>),
}

impl CategorySelection {
    /// An explicit empty selection
    pub fn none() -> Self {
        Self::Only(Vec::new())
    }

    pub fn allows(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(allowed) => allowed.contains(category),
        }
    }
}

/// Builder for narrowing expense snapshots
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub categories: CategorySelection,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExpenseFilter {
    /// Create a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given categories
    pub fn only<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        self.categories = CategorySelection::Only(categories.into_iter().collect());
        self
    }

    /// Set the category selection directly
    pub fn categories(mut self, selection: CategorySelection) -> Self {
        self.categories = selection;
        self
    }

    /// Set the inclusive start date
    pub fn from(mut self, date: Option<NaiveDate>) -> Self {
        self.from = date;
        self
    }

    /// Set the inclusive end date
    pub fn to(mut self, date: Option<NaiveDate>) -> Self {
        self.to = date;
        self
    }

    /// Set both range endpoints
    pub fn date_range(mut self, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.from = range.map(|(from, _)| from);
        self.to = range.map(|(_, to)| to);
        self
    }

    /// The effective date range. Only applies when both endpoints are set.
    pub fn active_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }

    /// True when the filter lets every expense through
    pub fn is_unrestricted(&self) -> bool {
        self.categories == CategorySelection::All && self.active_date_range().is_none()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.categories.allows(&expense.category) {
            return false;
        }
        match self.active_date_range() {
            Some((from, to)) => expense.date >= from && expense.date <= to,
            None => true,
        }
    }

    /// Apply the filter, keeping input order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        if self.from.is_some() != self.to.is_some() {
            debug!(
                from = ?self.from,
                to = ?self.to,
                "Ignoring partial date range"
            );
        }

        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense {
                id: 1,
                date: date(1, 5),
                category: Category::Food,
                amount: dec!(200),
                description: "lunch".to_string(),
            },
            Expense {
                id: 2,
                date: date(1, 10),
                category: Category::Bills,
                amount: dec!(500),
                description: "electricity".to_string(),
            },
            Expense {
                id: 3,
                date: date(2, 1),
                category: Category::Food,
                amount: dec!(100),
                description: "snacks".to_string(),
            },
        ]
    }

    fn ids(expenses: &[Expense]) -> Vec<i64> {
        expenses.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_default_filter_returns_input_unchanged() {
        let expenses = sample();
        let filter = ExpenseFilter::new();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&expenses), expenses);
    }

    #[test]
    fn test_explicit_empty_selection_matches_nothing() {
        let filter = ExpenseFilter::new().categories(CategorySelection::none());
        assert!(!filter.is_unrestricted());
        assert!(filter.apply(&sample()).is_empty());

        let filter = ExpenseFilter::new().only(Vec::new());
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn test_category_filter() {
        let filter = ExpenseFilter::new().only([Category::Food]);
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 3]);

        let filter = ExpenseFilter::new().only([Category::Other("Travel".to_string())]);
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = ExpenseFilter::new().date_range(Some((date(1, 5), date(1, 10))));
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 2]);
    }

    #[test]
    fn test_partial_date_range_is_ignored() {
        let expenses = sample();

        let only_from = ExpenseFilter::new().from(Some(date(2, 1)));
        assert!(only_from.active_date_range().is_none());
        assert_eq!(only_from.apply(&expenses), expenses);

        let only_to = ExpenseFilter::new().to(Some(date(1, 1)));
        assert!(only_to.is_unrestricted());
        assert_eq!(only_to.apply(&expenses), expenses);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let filter = ExpenseFilter::new().date_range(Some((date(2, 1), date(1, 1))));
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn test_category_and_date_combine() {
        let filter = ExpenseFilter::new()
            .only([Category::Food])
            .date_range(Some((date(1, 1), date(1, 31))));
        assert_eq!(ids(&filter.apply(&sample())), vec![1]);
    }

    #[test]
    fn test_apply_preserves_input_order() {
        let mut expenses = sample();
        expenses.reverse();
        let filter = ExpenseFilter::new().only([Category::Food]);
        assert_eq!(ids(&filter.apply(&expenses)), vec![3, 1]);
    }
}
