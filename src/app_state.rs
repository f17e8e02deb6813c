//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    expense::{CategoryMode, ExpenseStore},
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store holding live expenses and the deleted history.
    pub expense_store: ExpenseStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the expense table
    /// if it does not exist yet. `category_mode` controls which categories
    /// the store accepts.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, category_mode: CategoryMode) -> Result<Self, Error> {
        let expense_store = ExpenseStore::new(db_connection, category_mode)?;

        Ok(Self { expense_store })
    }
}

impl FromRef<AppState> for ExpenseStore {
    fn from_ref(state: &AppState) -> Self {
        state.expense_store.clone()
    }
}
