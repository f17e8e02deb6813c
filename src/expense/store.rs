//! The expense store: validated CRUD, search, sort and totals over the
//! expense table, plus the history of expenses deleted since startup.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    db::initialize,
    expense::{
        CategoryMode, Expense, ExpenseId, ExpenseTotals, SortField, SortOrder,
        db::{
            create_expense, delete_expense, get_all_expenses, get_expense, get_expense_totals,
            get_sorted_expenses, search_expenses, update_expense,
        },
        domain::validate_amount,
    },
};

/// Creates, retrieves, updates and deletes expenses in a SQLite database.
///
/// Cloning the store is cheap, clones share the same database connection and
/// deleted history. Every operation locks the connection for its duration,
/// so each add, update and delete is atomic with respect to other operations.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    connection: Arc<Mutex<Connection>>,
    deleted_history: Arc<Mutex<Vec<Expense>>>,
    category_mode: CategoryMode,
}

impl ExpenseStore {
    /// Create an expense store and create the expense table if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(connection: Connection, category_mode: CategoryMode) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            deleted_history: Arc::new(Mutex::new(Vec::new())),
            category_mode,
        })
    }

    /// The rule used to validate categories.
    pub fn category_mode(&self) -> CategoryMode {
        self.category_mode
    }

    /// Record a new expense and return its ID.
    ///
    /// `amount` is rounded to two decimal places before it is stored.
    ///
    /// # Errors
    /// Returns a validation error ([Error::EmptyCategory], [Error::UnknownCategory],
    /// [Error::InvalidAmount] or [Error::AmountTooLarge]) before touching the
    /// database, or an [Error::SqlError] if the insert fails.
    pub fn add(&self, category: &str, amount: f64, date: Date) -> Result<ExpenseId, Error> {
        let category = self.category_mode.validate(category)?;
        let amount = validate_amount(amount)?;

        let expense = create_expense(category, amount, date, &*self.lock_connection()?)?;
        tracing::info!(
            "Added expense {} ({}, {:.2}, {})",
            expense.id,
            expense.category,
            expense.amount,
            expense.date
        );

        Ok(expense.id)
    }

    /// Retrieve a live expense by ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a live expense.
    pub fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        get_expense(id, &*self.lock_connection()?)
    }

    /// Retrieve all live expenses, most recent first.
    pub fn get_all(&self) -> Result<Vec<Expense>, Error> {
        get_all_expenses(&*self.lock_connection()?)
    }

    /// Overwrite the category, amount and date of a live expense.
    ///
    /// # Errors
    /// Returns a validation error before touching the database, or
    /// [Error::UpdateMissingExpense] if `id` does not refer to a live expense.
    pub fn update(
        &self,
        id: ExpenseId,
        category: &str,
        amount: f64,
        date: Date,
    ) -> Result<Expense, Error> {
        let category = self.category_mode.validate(category)?;
        let amount = validate_amount(amount)?;

        let expense = update_expense(id, category, amount, date, &*self.lock_connection()?)?;
        tracing::info!("Updated expense {id}");

        Ok(expense)
    }

    /// Delete a live expense, add it to the deleted history and return it.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingExpense] if `id` does not refer to a live expense.
    pub fn delete(&self, id: ExpenseId) -> Result<Expense, Error> {
        // Keep the connection locked until the history is updated, the
        // expense must always be in exactly one of the two collections.
        let connection = self.lock_connection()?;
        let mut deleted_history = self
            .deleted_history
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire deleted history lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let expense = delete_expense(id, &connection)?;
        deleted_history.push(expense.clone());
        tracing::info!("Deleted expense {id}");

        Ok(expense)
    }

    /// Retrieve the live expenses whose category contains `query`, ignoring case.
    ///
    /// An empty query returns every live expense.
    pub fn search(&self, query: &str) -> Result<Vec<Expense>, Error> {
        search_expenses(query, &*self.lock_connection()?)
    }

    /// Retrieve all live expenses ordered by `field`.
    ///
    /// This does not change the order returned by [ExpenseStore::get_all].
    pub fn sort(&self, field: SortField, order: SortOrder) -> Result<Vec<Expense>, Error> {
        get_sorted_expenses(field, order, &*self.lock_connection()?)
    }

    /// Sum the live expenses per category and overall.
    pub fn totals(&self) -> Result<ExpenseTotals, Error> {
        get_expense_totals(&*self.lock_connection()?)
    }

    /// The expenses deleted since the store was created, oldest deletion first.
    pub fn deleted_history(&self) -> Result<Vec<Expense>, Error> {
        self.deleted_history
            .lock()
            .map(|history| history.clone())
            .inspect_err(|error| tracing::error!("could not acquire deleted history lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}
