//! Expense deletion endpoint.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxResponseTrigger;

use crate::{
    Error,
    alert::Alert,
    expense::{ExpenseId, ExpenseStore},
};

/// The htmx event sent to the client after an expense is deleted.
pub(super) const EXPENSE_DELETED_EVENT: &str = "expense-deleted";

/// Handle expense deletion. Returns success alert or error.
///
/// The deleted expense is moved to the store's deleted history. On success
/// the response triggers [EXPENSE_DELETED_EVENT] so the expenses page can
/// reload its tables.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(store): State<ExpenseStore>,
) -> Response {
    match store.delete(expense_id) {
        Ok(_) => (
            HxResponseTrigger::normal([EXPENSE_DELETED_EVENT]),
            Alert::SuccessSimple {
                message: "Expense deleted successfully".to_owned(),
            },
        )
            .into_response(),
        Err(Error::DeleteMissingExpense) => Error::DeleteMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
