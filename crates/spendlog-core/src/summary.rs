//! Spending summaries
//!
//! Pure aggregations over expense snapshots. Every function is total over
//! any slice, including the empty one. Sums saturate at `Decimal::MAX`
//! rather than overflow.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{
    BudgetStatus, Category, CategoryTotal, DailyCategoryTotal, DashboardStats, Expense, YearMonth,
};

/// Sum of all amounts; zero when empty
pub fn total_amount(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.amount))
}

/// Category with the largest summed amount
///
/// Ties go to the category encountered first. `None` when empty.
pub fn top_category(expenses: &[Expense]) -> Option<Category> {
    let mut best: Option<CategoryTotal> = None;
    for total in by_category(expenses) {
        // strictly greater keeps the earliest category on ties
        if best.as_ref().map_or(true, |b| total.amount > b.amount) {
            best = Some(total);
        }
    }
    best.map(|b| b.category)
}

/// Largest single amount; `None` when empty
pub fn max_single_expense(expenses: &[Expense]) -> Option<Decimal> {
    expenses.iter().map(|e| e.amount).max()
}

/// Spending per category, in order of first appearance
pub fn by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(total) => {
                total.amount = total.amount.saturating_add(expense.amount);
                total.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                amount: expense.amount,
                count: 1,
                percentage: Decimal::ZERO,
            }),
        }
    }

    let grand_total = totals
        .iter()
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount));
    if grand_total > Decimal::ZERO {
        for total in &mut totals {
            // amount <= grand_total, so the share stays within 0..=100
            total.percentage = (total.amount / grand_total * Decimal::ONE_HUNDRED).round_dp(2);
        }
    }

    totals
}

/// Spending per category within a single calendar month
pub fn by_category_for_month(expenses: &[Expense], month: YearMonth) -> Vec<CategoryTotal> {
    let in_month: Vec<Expense> = expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect();
    by_category(&in_month)
}

/// Spending per calendar month, in chronological order
pub fn by_month(expenses: &[Expense]) -> BTreeMap<YearMonth, Decimal> {
    let mut months = BTreeMap::new();
    for expense in expenses {
        let sum = months.entry(expense.month()).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(expense.amount);
    }
    months
}

/// Spending per day and category
///
/// Ordered by date, then by first appearance of the category on that day.
pub fn daily_by_category(expenses: &[Expense]) -> Vec<DailyCategoryTotal> {
    let mut totals: Vec<DailyCategoryTotal> = Vec::new();

    for expense in expenses {
        match totals
            .iter_mut()
            .find(|t| t.date == expense.date && t.category == expense.category)
        {
            Some(total) => total.amount = total.amount.saturating_add(expense.amount),
            None => totals.push(DailyCategoryTotal {
                date: expense.date,
                category: expense.category.clone(),
                amount: expense.amount,
            }),
        }
    }

    // stable sort keeps first-appearance order within a day
    totals.sort_by_key(|t| t.date);
    totals
}

/// Headline numbers for the dashboard
pub fn dashboard(expenses: &[Expense]) -> DashboardStats {
    DashboardStats {
        expense_count: expenses.len(),
        total: total_amount(expenses),
        top_category: top_category(expenses),
        highest_expense: max_single_expense(expenses),
    }
}

/// Compare a spending total against a budget
///
/// Fails with `InvalidBudget` when the budget is not positive, or so small
/// that `total / budget` does not fit in a `Decimal`.
pub fn budget_status(total: Decimal, budget: Decimal) -> Result<BudgetStatus> {
    if budget <= Decimal::ZERO {
        return Err(Error::InvalidBudget(budget));
    }
    let ratio = total
        .checked_div(budget)
        .ok_or(Error::InvalidBudget(budget))?;

    Ok(BudgetStatus {
        budget,
        total,
        ratio,
        over_budget: total > budget,
        remaining: budget - total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(id: i64, m: u32, d: u32, category: Category, amount: Decimal) -> Expense {
        Expense {
            id,
            date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            category,
            amount,
            description: String::new(),
        }
    }

    fn scenario() -> Vec<Expense> {
        vec![
            expense(1, 1, 5, Category::Food, dec!(200)),
            expense(2, 1, 10, Category::Bills, dec!(500)),
            expense(3, 2, 1, Category::Food, dec!(100)),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(total_amount(&[]), Decimal::ZERO);
        assert_eq!(top_category(&[]), None);
        assert_eq!(max_single_expense(&[]), None);
        assert!(by_category(&[]).is_empty());
        assert!(by_month(&[]).is_empty());
        assert!(daily_by_category(&[]).is_empty());

        let stats = dashboard(&[]);
        assert_eq!(stats.expense_count, 0);
        assert_eq!(stats.total, Decimal::ZERO);
        assert!(stats.top_category.is_none());
    }

    #[test]
    fn test_scenario_totals() {
        let expenses = scenario();
        assert_eq!(total_amount(&expenses), dec!(800));
        // Bills = 500 beats Food = 300
        assert_eq!(top_category(&expenses), Some(Category::Bills));
        assert_eq!(max_single_expense(&expenses), Some(dec!(500)));
    }

    #[test]
    fn test_scenario_by_month() {
        let months = by_month(&scenario());
        let entries: Vec<(String, Decimal)> =
            months.into_iter().map(|(m, a)| (m.to_string(), a)).collect();
        assert_eq!(
            entries,
            vec![
                ("2024-01".to_string(), dec!(700)),
                ("2024-02".to_string(), dec!(100)),
            ]
        );
    }

    #[test]
    fn test_by_month_orders_chronologically_across_years() {
        let expenses = vec![
            Expense {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                ..expense(1, 1, 1, Category::Food, dec!(5))
            },
            Expense {
                date: NaiveDate::from_ymd_opt(2023, 12, 30).unwrap(),
                ..expense(2, 1, 1, Category::Food, dec!(7))
            },
        ];
        let keys: Vec<String> = by_month(&expenses).keys().map(|m| m.to_string()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn test_by_category_first_appearance_order() {
        let totals = by_category(&scenario());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, Category::Food);
        assert_eq!(totals[0].amount, dec!(300));
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[0].percentage, dec!(37.50));
        assert_eq!(totals[1].category, Category::Bills);
        assert_eq!(totals[1].percentage, dec!(62.50));
    }

    #[test]
    fn test_top_category_tie_goes_to_first_encountered() {
        let expenses = vec![
            expense(1, 1, 1, Category::Transport, dec!(50)),
            expense(2, 1, 2, Category::Shopping, dec!(50)),
        ];
        assert_eq!(top_category(&expenses), Some(Category::Transport));
    }

    #[test]
    fn test_by_category_for_month() {
        let jan = YearMonth::new(2024, 1).unwrap();
        let totals = by_category_for_month(&scenario(), jan);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].amount, dec!(200));
        assert_eq!(totals[1].amount, dec!(500));

        let mar = YearMonth::new(2024, 3).unwrap();
        assert!(by_category_for_month(&scenario(), mar).is_empty());
    }

    #[test]
    fn test_daily_by_category() {
        let expenses = vec![
            expense(1, 1, 2, Category::Food, dec!(10)),
            expense(2, 1, 1, Category::Bills, dec!(40)),
            expense(3, 1, 2, Category::Transport, dec!(5)),
            expense(4, 1, 2, Category::Food, dec!(15)),
        ];
        let daily = daily_by_category(&expenses);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].category, Category::Bills);
        assert_eq!(daily[1].category, Category::Food);
        assert_eq!(daily[1].amount, dec!(25));
        assert_eq!(daily[2].category, Category::Transport);
    }

    #[test]
    fn test_dashboard() {
        let stats = dashboard(&scenario());
        assert_eq!(stats.expense_count, 3);
        assert_eq!(stats.total, dec!(800));
        assert_eq!(stats.top_category, Some(Category::Bills));
        assert_eq!(stats.highest_expense, Some(dec!(500)));
    }

    #[test]
    fn test_budget_within() {
        let status = budget_status(dec!(800), dec!(1000)).unwrap();
        assert_eq!(status.ratio, dec!(0.8));
        assert!(!status.over_budget);
        assert_eq!(status.remaining, dec!(200));
        assert_eq!(status.progress(), dec!(0.8));
    }

    #[test]
    fn test_budget_exceeded() {
        let status = budget_status(dec!(800), dec!(500)).unwrap();
        assert!(status.over_budget);
        assert_eq!(status.remaining, dec!(-300));
        assert_eq!(status.progress(), Decimal::ONE);
    }

    #[test]
    fn test_budget_exactly_spent_is_not_over() {
        let status = budget_status(dec!(500), dec!(500)).unwrap();
        assert!(!status.over_budget);
        assert_eq!(status.remaining, Decimal::ZERO);
    }

    #[test]
    fn test_budget_must_be_positive() {
        assert!(matches!(
            budget_status(dec!(800), Decimal::ZERO),
            Err(Error::InvalidBudget(_))
        ));
        assert!(matches!(
            budget_status(dec!(800), dec!(-1)),
            Err(Error::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_budget_too_small_for_ratio() {
        let tiny = Decimal::new(1, 28);
        assert!(matches!(
            budget_status(dec!(1000), tiny),
            Err(Error::InvalidBudget(b)) if b == tiny
        ));
        // nothing spent still divides fine
        let status = budget_status(Decimal::ZERO, tiny).unwrap();
        assert_eq!(status.ratio, Decimal::ZERO);
    }

    #[test]
    fn test_sums_saturate_instead_of_overflowing() {
        let expenses = vec![
            expense(1, 1, 1, Category::Food, Decimal::MAX),
            expense(2, 1, 1, Category::Food, Decimal::MAX),
            expense(3, 1, 2, Category::Bills, dec!(10)),
        ];
        assert_eq!(total_amount(&expenses), Decimal::MAX);
        assert_eq!(by_category(&expenses)[0].amount, Decimal::MAX);
        assert_eq!(by_month(&expenses).values().next(), Some(&Decimal::MAX));
        assert_eq!(daily_by_category(&expenses)[0].amount, Decimal::MAX);
        assert_eq!(dashboard(&expenses).total, Decimal::MAX);
    }
}
