//! Report command implementations
//!
//! Each command gathers its numbers from `spendlog_core::summary` and hands
//! them to a `render_*` function that builds the text output.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendlog_core::{
    summary, BudgetStatus, CategoryTotal, DailyCategoryTotal, DashboardStats, ExpenseFilter,
    ExpenseStore, Ledger, SortOrder, YearMonth,
};

use super::{format_amount, truncate};

/// Width of text progress bars
const BAR_WIDTH: usize = 30;

pub fn cmd_summary<S: ExpenseStore>(
    ledger: &Ledger<S>,
    filter: &ExpenseFilter,
    json: bool,
) -> Result<()> {
    let expenses = filter.apply(&ledger.list(SortOrder::default()));
    let stats = summary::dashboard(&expenses);
    let categories = summary::by_category(&expenses);

    if json {
        let value = serde_json::json!({
            "stats": stats,
            "categories": categories,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", render_summary(&stats, &categories));
    Ok(())
}

pub fn render_summary(stats: &DashboardStats, categories: &[CategoryTotal]) -> String {
    if stats.expense_count == 0 {
        return "💡 No expenses yet. Add your first one with 'spendlog add'.".to_string();
    }

    let mut lines = vec![
        String::new(),
        "🌈 Expense Dashboard".to_string(),
        "   ─────────────────────────────".to_string(),
        format!("   💰 Total expenses: {}", format_amount(stats.total)),
    ];
    if let Some(top) = &stats.top_category {
        lines.push(format!("   ⭐ Top category:   {}", top));
    }
    if let Some(highest) = stats.highest_expense {
        lines.push(format!("   🔥 Highest spend:  {}", format_amount(highest)));
    }
    lines.push(format!("   📝 Expenses:       {}", stats.expense_count));

    lines.push(String::new());
    lines.push("📊 By Category".to_string());
    for total in categories {
        lines.push(format!(
            "   {:<15} {:>10}  {:>6}%  ({} expenses)",
            truncate(total.category.as_str(), 15),
            format_amount(total.amount),
            total.percentage,
            total.count
        ));
    }

    lines.join("\n")
}

pub fn cmd_report_categories<S: ExpenseStore>(
    ledger: &Ledger<S>,
    month: Option<YearMonth>,
    json: bool,
) -> Result<()> {
    let expenses = ledger.list(SortOrder::default());
    let totals = match month {
        Some(month) => summary::by_category_for_month(&expenses, month),
        None => summary::by_category(&expenses),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!("{}", render_categories(&totals, month));
    Ok(())
}

pub fn render_categories(totals: &[CategoryTotal], month: Option<YearMonth>) -> String {
    let title = month.map_or_else(|| "all time".to_string(), |m| m.to_string());
    if totals.is_empty() {
        return format!("No expenses found for {}.", title);
    }

    let mut lines = vec![
        String::new(),
        format!("📊 Spending by Category ({})", title),
        "   ─────────────────────────────────────────────".to_string(),
    ];
    for total in totals {
        lines.push(format!(
            "   {:<15} {:>10}  {}  {}%",
            truncate(total.category.as_str(), 15),
            format_amount(total.amount),
            bar(total.percentage / Decimal::ONE_HUNDRED),
            total.percentage
        ));
    }

    lines.join("\n")
}

pub fn cmd_report_trend<S: ExpenseStore>(
    ledger: &Ledger<S>,
    filter: &ExpenseFilter,
    json: bool,
) -> Result<()> {
    let expenses = filter.apply(&ledger.list(SortOrder::default()));
    let months = summary::by_month(&expenses);

    if json {
        println!("{}", serde_json::to_string_pretty(&months)?);
        return Ok(());
    }

    println!("{}", render_trend(&months));
    Ok(())
}

pub fn render_trend(months: &BTreeMap<YearMonth, Decimal>) -> String {
    let Some(peak) = months.values().copied().max() else {
        return "No data available to plot trend.".to_string();
    };

    let mut lines = vec![
        String::new(),
        "📈 Monthly Spending Trend".to_string(),
        "   ─────────────────────────────────────────────".to_string(),
    ];
    for (month, amount) in months {
        // every amount is <= peak and peak > 0
        let fraction = amount.checked_div(peak).unwrap_or(Decimal::ZERO);
        lines.push(format!(
            "   {}  {:>10}  {}",
            month,
            format_amount(*amount),
            bar(fraction)
        ));
    }

    lines.join("\n")
}

pub fn cmd_report_daily<S: ExpenseStore>(
    ledger: &Ledger<S>,
    filter: &ExpenseFilter,
    json: bool,
) -> Result<()> {
    let expenses = filter.apply(&ledger.list(SortOrder::default()));
    let daily = summary::daily_by_category(&expenses);

    if json {
        println!("{}", serde_json::to_string_pretty(&daily)?);
        return Ok(());
    }

    println!("{}", render_daily(&daily));
    Ok(())
}

pub fn render_daily(daily: &[DailyCategoryTotal]) -> String {
    if daily.is_empty() {
        return "No expenses match the filter.".to_string();
    }

    let mut lines = vec![
        String::new(),
        "📅 Daily Expenses by Category".to_string(),
        "   ─────────────────────────────────────────────".to_string(),
    ];
    let mut last_date = None;
    for total in daily {
        let date = if last_date == Some(total.date) {
            " ".repeat(10)
        } else {
            total.date.to_string()
        };
        last_date = Some(total.date);
        lines.push(format!(
            "   {} │ {:<15} {:>10}",
            date,
            truncate(total.category.as_str(), 15),
            format_amount(total.amount)
        ));
    }

    lines.join("\n")
}

pub fn cmd_budget<S: ExpenseStore>(
    ledger: &Ledger<S>,
    filter: &ExpenseFilter,
    budget: Decimal,
    month: Option<YearMonth>,
) -> Result<()> {
    let mut expenses = filter.apply(&ledger.list(SortOrder::default()));
    if let Some(month) = month {
        expenses.retain(|e| month.contains(e.date));
    }
    let total = summary::total_amount(&expenses);

    let status = summary::budget_status(total, budget).context("Cannot compute budget status")?;

    println!("{}", render_budget(&status));
    Ok(())
}

pub fn render_budget(status: &BudgetStatus) -> String {
    let percent = status
        .ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .map_or_else(|| "∞".to_string(), |p| p.round().to_string());

    let mut lines = vec![
        String::new(),
        "🎯 Budget Tracker".to_string(),
        "   ─────────────────────────────".to_string(),
        format!(
            "   {} of {} spent",
            format_amount(status.total),
            format_amount(status.budget)
        ),
        format!("   {} {}%", bar(status.progress()), percent),
    ];

    if status.over_budget {
        lines.push(format!(
            "   ⚠️  You have exceeded your budget by {}!",
            format_amount(-status.remaining)
        ));
    } else {
        lines.push(format!(
            "   ✅ Within budget. Remaining: {}",
            format_amount(status.remaining)
        ));
    }

    lines.join("\n")
}

/// Render a 0..=1 fraction as a text bar
fn bar(fraction: Decimal) -> String {
    let fraction = fraction.clamp(Decimal::ZERO, Decimal::ONE);
    let filled = (fraction * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn filled(s: &str) -> usize {
        s.chars().filter(|c| *c == '█').count()
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(filled(&bar(dec!(0))), 0);
        assert_eq!(filled(&bar(dec!(0.5))), 15);
        assert_eq!(filled(&bar(dec!(2))), 30);
        assert_eq!(bar(dec!(0.5)).chars().count(), 30);
    }

    #[test]
    fn test_render_budget_huge_ratio() {
        let status = BudgetStatus {
            budget: Decimal::new(1, 28),
            total: dec!(1),
            ratio: Decimal::MAX,
            over_budget: true,
            remaining: Decimal::new(1, 28) - dec!(1),
        };
        let out = render_budget(&status);
        assert!(out.contains("∞%"));
        assert!(out.contains("exceeded"));
        assert_eq!(filled(&out), BAR_WIDTH);
    }
}
