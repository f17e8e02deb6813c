//! Expense Tracker is a web app for recording and reviewing personal expenses.
//!
//! This library provides an [ExpenseStore] backed by SQLite and a set of
//! routes that directly serve HTML pages and forms for the store's operations.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{
    CategoryMode, CategoryName, Expense, ExpenseCategory, ExpenseId, ExpenseStore, ExpenseTotals,
    SortField, SortOrder, round_to_cents,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for the ctrl+c signal: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty (or all whitespace) string was used as a category.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// The category is not one of the fixed expense categories.
    ///
    /// Only raised when the store validates categories in
    /// [CategoryMode::Fixed].
    #[error("\"{0}\" is not a valid category")]
    UnknownCategory(String),

    /// The amount was zero, negative, not a number or rounded down to zero.
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(f64),

    /// The amount has more digits than can be stored to the cent.
    #[error("Amount {0} is too large")]
    AmountTooLarge(f64),

    /// The field to sort expenses by is not one of the sortable fields.
    #[error("Cannot sort expenses by \"{0}\"")]
    InvalidSortField(String),

    /// The sort order is neither ascending nor descending.
    #[error("\"{0}\" is not a valid sort order")]
    InvalidSortOrder(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist.
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist.
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Whether the error was caused by invalid user input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyCategory
                | Error::UnknownCategory(_)
                | Error::InvalidAmount(_)
                | Error::AmountTooLarge(_)
                | Error::InvalidSortField(_)
                | Error::InvalidSortOrder(_)
        )
    }

    /// Whether the error was caused by an ID that does not refer to a live expense.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DatabaseLockError => InternalServerError {
                description: "Database Unavailable",
                fix: "The database is busy or unavailable. Please try again.",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = match &self {
            error if error.is_validation_error() => (
                StatusCode::BAD_REQUEST,
                "Invalid expense",
                error.to_string(),
            ),
            Error::UpdateMissingExpense | Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Could not update expense",
                "The expense could not be found.".to_owned(),
            ),
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                "Could not delete expense",
                "The expense could not be found. \
                Try refreshing the page to see if the expense has already been deleted."
                    .to_owned(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        (
            status_code,
            Alert::Error {
                message: message.to_owned(),
                details,
            },
        )
            .into_response()
    }
}
