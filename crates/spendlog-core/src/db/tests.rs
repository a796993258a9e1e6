//! Database tests

use super::*;
use crate::models::*;
use crate::store::ExpenseStore;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn expense(y: i32, m: u32, d: u32, category: Category, amount: rust_decimal::Decimal) -> NewExpense {
    NewExpense::new(
        NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        category,
        amount,
        "test",
    )
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);
    assert!(db.list_expenses().unwrap().is_empty());
}

#[test]
fn test_expenses_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('expenses') WHERE name IN ('id', 'date', 'category', 'amount', 'note', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 6, "expenses table should have 6 expected columns");
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::in_memory().unwrap();
    db.insert_expense(&expense(2024, 1, 5, Category::Food, dec!(200)))
        .unwrap();

    // Reopening the same file must not drop existing rows
    let reopened = Database::new(db.path()).unwrap();
    assert_eq!(reopened.count_expenses().unwrap(), 1);
}

#[test]
fn test_insert_and_get_expense() {
    let db = Database::in_memory().unwrap();
    let id = db
        .insert_expense(&expense(2024, 1, 10, Category::Bills, dec!(500)))
        .unwrap();
    assert!(id > 0);

    let stored = db.get_expense(id).unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.category, Category::Bills);
    assert_eq!(stored.amount, dec!(500));
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

    assert!(db.get_expense(id + 100).unwrap().is_none());
}

#[test]
fn test_amount_round_trips_exactly() {
    let db = Database::in_memory().unwrap();
    let id = db
        .insert_expense(&expense(2024, 1, 1, Category::Food, dec!(0.10)))
        .unwrap();
    db.insert_expense(&expense(2024, 1, 1, Category::Food, dec!(0.20)))
        .unwrap();

    let stored = db.get_expense(id).unwrap().unwrap();
    assert_eq!(stored.amount, dec!(0.10));

    let total: rust_decimal::Decimal = db.list_expenses().unwrap().iter().map(|e| e.amount).sum();
    assert_eq!(total, dec!(0.30));
}

#[test]
fn test_free_text_category_round_trips() {
    let db = Database::in_memory().unwrap();
    let id = db
        .insert_expense(&expense(
            2024,
            1,
            1,
            Category::Other("Travel".to_string()),
            dec!(42),
        ))
        .unwrap();

    let stored = db.get_expense(id).unwrap().unwrap();
    assert_eq!(stored.category, Category::Other("Travel".to_string()));
}

#[test]
fn test_list_expenses_in_insertion_order() {
    let db = Database::in_memory().unwrap();
    let first = db
        .insert_expense(&expense(2024, 3, 1, Category::Food, dec!(1)))
        .unwrap();
    let second = db
        .insert_expense(&expense(2024, 1, 1, Category::Food, dec!(2)))
        .unwrap();

    let all = db.list_expenses().unwrap();
    assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![first, second]);
}

#[test]
fn test_delete_expense() {
    let db = Database::in_memory().unwrap();
    let id = db
        .insert_expense(&expense(2024, 1, 1, Category::Food, dec!(1)))
        .unwrap();

    db.delete_expense(id).unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);

    let err = db.delete_expense(id).unwrap_err();
    assert!(matches!(err, Error::NotFound(missing) if missing == id));
}

#[test]
fn test_ids_not_reused_after_delete() {
    let db = Database::in_memory().unwrap();
    let first = db
        .insert_expense(&expense(2024, 1, 1, Category::Food, dec!(1)))
        .unwrap();
    db.delete_expense(first).unwrap();
    let second = db
        .insert_expense(&expense(2024, 1, 1, Category::Food, dec!(1)))
        .unwrap();
    assert!(second > first);
}

#[test]
fn test_clear_expenses() {
    let db = Database::in_memory().unwrap();
    for day in 1..=3 {
        db.insert_expense(&expense(2024, 1, day, Category::Food, dec!(1)))
            .unwrap();
    }
    assert_eq!(db.clear_expenses().unwrap(), 3);
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_database_as_expense_store() {
    let mut db = Database::in_memory().unwrap();
    let id = db
        .create(&expense(2024, 1, 1, Category::Shopping, dec!(19.99)))
        .unwrap();
    assert_eq!(db.read_all().unwrap().len(), 1);
    db.delete_by_id(id).unwrap();
    assert!(matches!(db.delete_by_id(id), Err(Error::NotFound(_))));
}

#[test]
fn test_clones_share_the_same_database() {
    let db = Database::in_memory().unwrap();
    let clone = db.clone();
    db.insert_expense(&expense(2024, 1, 1, Category::Food, dec!(1)))
        .unwrap();
    assert_eq!(clone.count_expenses().unwrap(), 1);
}
