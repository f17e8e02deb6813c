//! Database operations for expenses.
//!
//! These functions expect already validated input, see [ExpenseStore](super::ExpenseStore)
//! for the checked API.

use std::collections::BTreeMap;

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    expense::{
        CategoryName, Expense, ExpenseId, SortField, SortOrder, domain::round_to_cents,
    },
};

/// Totals of live expenses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseTotals {
    /// The sum of amounts per category, rounded to two decimal places.
    ///
    /// Categories without any live expenses are not included.
    pub by_category: BTreeMap<CategoryName, f64>,
    /// The sum of all live expenses, rounded to two decimal places.
    pub grand_total: f64,
}

const SELECT_EXPENSE: &str = "SELECT id, category, amount, date FROM expense";

/// Insert an expense and return it with its generated ID.
pub fn create_expense(
    category: CategoryName,
    amount: f64,
    date: Date,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(
            "INSERT INTO expense (category, amount, date) VALUES (?1, ?2, ?3)
             RETURNING id, category, amount, date",
        )?
        .query_row((category.as_ref(), amount, date), map_expense_row)
        .map_err(Error::from)
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `expense_id` does not refer to a live expense.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} WHERE id = :id"))?
        .query_row(&[(":id", &expense_id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses, most recent first.
///
/// Expenses on the same date are returned in the order they were created.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} ORDER BY date DESC, id ASC"))?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all expenses ordered by `field`.
///
/// Expenses with equal values for `field` are returned in the order they were created.
pub fn get_sorted_expenses(
    field: SortField,
    order: SortOrder,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    // Both fragments come from fixed strings, never from user input.
    let query = format!(
        "{SELECT_EXPENSE} ORDER BY {} {}, id ASC",
        field.column(),
        order.keyword()
    );

    connection
        .prepare(&query)?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the expenses whose category contains `query`, ignoring case.
///
/// SQLite's `LIKE` only folds ASCII letters, so the matching is done on the
/// Rust side to handle any Unicode category name.
pub fn search_expenses(query: &str, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let expenses = get_all_expenses(connection)?
        .into_iter()
        .filter(|expense| expense.category_contains(query))
        .collect();

    Ok(expenses)
}

/// Update all fields of an expense, keeping its ID.
///
/// # Errors
/// Returns [Error::UpdateMissingExpense] if the expense does not exist.
pub fn update_expense(
    expense_id: ExpenseId,
    category: CategoryName,
    amount: f64,
    date: Date,
    connection: &Connection,
) -> Result<Expense, Error> {
    let rows_affected = connection.execute(
        "UPDATE expense SET category = ?1, amount = ?2, date = ?3 WHERE id = ?4",
        (category.as_ref(), amount, date, expense_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(Expense {
        id: expense_id,
        category,
        amount,
        date,
    })
}

/// Delete an expense by ID and return the removed row.
///
/// # Errors
/// Returns [Error::DeleteMissingExpense] if the expense does not exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("DELETE FROM expense WHERE id = ?1 RETURNING id, category, amount, date")?
        .query_row([expense_id], map_expense_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::DeleteMissingExpense,
            error => error.into(),
        })
}

/// Sum the amounts of all expenses per category.
pub fn get_expense_totals(connection: &Connection) -> Result<ExpenseTotals, Error> {
    let by_category: BTreeMap<CategoryName, f64> = connection
        .prepare("SELECT category, SUM(amount) FROM expense GROUP BY category")?
        .query_map([], |row| {
            let raw_category: String = row.get(0)?;
            let total: f64 = row.get(1)?;

            Ok((CategoryName::new_unchecked(&raw_category), cents(total)))
        })?
        .collect::<Result<_, rusqlite::Error>>()?;

    let grand_total = cents(by_category.values().sum());

    Ok(ExpenseTotals {
        by_category,
        grand_total,
    })
}

/// Remove the floating point noise that summing cent amounts can introduce.
fn cents(amount: f64) -> f64 {
    round_to_cents(amount).unwrap_or(amount)
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date, id);",
    )?;

    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_category: String = row.get(1)?;
    let category = CategoryName::new_unchecked(&raw_category);
    let amount = row.get(2)?;
    let date = row.get(3)?;

    Ok(Expense {
        id,
        category,
        amount,
        date,
    })
}
