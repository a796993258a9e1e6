//! Expense command implementations (add, list, delete, categories)

use anyhow::{Context, Result};
use spendlog_core::models::PRESET_CATEGORIES;
use spendlog_core::{Error, ExpenseFilter, ExpenseForm, ExpenseStore, Ledger, SortOrder};

use super::{format_amount, truncate};

pub fn cmd_add<S: ExpenseStore>(
    ledger: &mut Ledger<S>,
    amount: &str,
    category: &str,
    note: &str,
    date: Option<&str>,
) -> Result<()> {
    let form = ExpenseForm {
        date: date.map(str::to_string),
        category: category.to_string(),
        amount: amount.to_string(),
        description: note.to_string(),
    };

    let expense = ledger
        .on_add_submit(&form)
        .context("Could not add expense")?;

    println!("🎉 Expense added!");
    println!(
        "   [{}] {} │ {:>10} │ {} │ {}",
        expense.id,
        expense.date,
        format_amount(expense.amount),
        expense.category,
        truncate(&expense.description, 40)
    );

    Ok(())
}

pub fn cmd_list<S: ExpenseStore>(
    ledger: &Ledger<S>,
    filter: &ExpenseFilter,
    order: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let order: SortOrder = order.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let mut expenses = filter.apply(&ledger.list(order));
    if let Some(limit) = limit {
        expenses.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    if expenses.is_empty() {
        if ledger.is_empty() {
            println!("💡 No expenses yet. Add your first one with:");
            println!("  spendlog add --amount 12.50 --category Food --note lunch");
        } else {
            println!("No expenses match the filter.");
        }
        return Ok(());
    }

    println!();
    println!("📋 Expense Records");
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in &expenses {
        println!(
            "   [{}] {} │ {:>10} │ {:<13} │ {}",
            expense.id,
            expense.date,
            format_amount(expense.amount),
            truncate(expense.category.as_str(), 13),
            truncate(&expense.description, 35)
        );
    }

    Ok(())
}

pub fn cmd_delete<S: ExpenseStore>(ledger: &mut Ledger<S>, id: i64) -> Result<()> {
    let expense = match ledger.delete(id) {
        Ok(expense) => expense,
        Err(Error::NotFound(_)) => anyhow::bail!("Expense {} not found", id),
        Err(e) => return Err(e).context("Failed to delete expense"),
    };

    println!("🗑️  Deleted expense {}:", id);
    println!(
        "   {} │ {} │ {} │ {}",
        expense.date,
        format_amount(expense.amount),
        expense.category,
        truncate(&expense.description, 40)
    );

    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    println!("📂 Categories");
    for label in PRESET_CATEGORIES {
        println!("   {}", label);
    }
    println!();
    println!("   Any other label is accepted too, e.g. --category Travel");
    Ok(())
}
