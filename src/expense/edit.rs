//! Expense editing page and endpoint.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    expense::{
        ExpenseId, ExpenseStore,
        domain::ExpenseFormData,
        form::{ExpenseFormDefaults, expense_form_fields},
        list::Notice,
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Render the expense editing page.
pub async fn get_edit_expense_page(
    Path(expense_id): Path<ExpenseId>,
    State(store): State<ExpenseStore>,
) -> Response {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_EXPENSE, expense_id);

    match store.get(expense_id) {
        Ok(expense) => {
            let defaults = ExpenseFormDefaults {
                category_mode: store.category_mode(),
                category: Some(expense.category.as_ref()),
                amount: Some(expense.amount),
                date: expense.date,
            };
            let form = edit_expense_form_view(&update_endpoint, &defaults, "");

            edit_expense_view(&edit_endpoint, form).into_response()
        }
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Expense not found",
                _ => {
                    tracing::error!("Failed to retrieve expense {expense_id}: {error}");
                    "Failed to load expense"
                }
            };
            let content = html! {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            };

            edit_expense_view(&edit_endpoint, content).into_response()
        }
    }
}

/// Handle expense update form submission.
///
/// On success the client is redirected to the expenses page with an
/// "Expense updated!" notice.
pub async fn update_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(store): State<ExpenseStore>,
    Form(form_data): Form<ExpenseFormData>,
) -> Response {
    match store.update(
        expense_id,
        &form_data.category,
        form_data.amount,
        form_data.date,
    ) {
        Ok(_) => (
            HxRedirect(Notice::Updated.redirect_url()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) if error.is_validation_error() => {
            let update_endpoint = endpoints::format_endpoint(endpoints::PUT_EXPENSE, expense_id);
            let defaults = ExpenseFormDefaults {
                category_mode: store.category_mode(),
                category: Some(&form_data.category),
                amount: Some(form_data.amount),
                date: form_data.date,
            };

            edit_expense_form_view(&update_endpoint, &defaults, &format!("Error: {error}"))
                .into_response()
        }
        Err(Error::UpdateMissingExpense) => Error::UpdateMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_expense_view(edit_endpoint: &str, content: Markup) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (content) }
    };

    base("Edit Expense", &content)
}

fn edit_expense_form_view(
    update_endpoint: &str,
    defaults: &ExpenseFormDefaults<'_>,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (expense_form_fields(defaults))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Expense" }
        }
    }
}


#[cfg(test)]
mod update_expense_endpoint_tests {
    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        expense::{
            CategoryMode, CategoryName, Expense, ExpenseStore, domain::ExpenseFormData,
            update_expense_endpoint,
        },
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment,
        },
    };

    fn get_store() -> ExpenseStore {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        ExpenseStore::new(connection, CategoryMode::Fixed).expect("Could not create expense store")
    }

    #[tokio::test]
    async fn can_update_expense() {
        let store = get_store();
        let id = store
            .add("Food", 5.0, date!(2024 - 01 - 01))
            .expect("Could not add expense");
        let form = ExpenseFormData {
            category: "clothing".to_owned(),
            amount: 30.5,
            date: date!(2024 - 01 - 02),
        };

        let response = update_expense_endpoint(Path(id), State(store.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/expenses?notice=updated");
        assert_eq!(
            store.get(id),
            Ok(Expense {
                id,
                category: CategoryName::new_unchecked("Clothing"),
                amount: 30.5,
                date: date!(2024 - 01 - 02),
            })
        );
    }

    #[tokio::test]
    async fn update_fails_on_invalid_amount() {
        let store = get_store();
        let id = store
            .add("Food", 5.0, date!(2024 - 01 - 01))
            .expect("Could not add expense");
        let form = ExpenseFormData {
            category: "Food".to_owned(),
            amount: -3.0,
            date: date!(2024 - 01 - 02),
        };

        let response = update_expense_endpoint(Path(id), State(store.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Amount must be greater than zero, got -3");
        assert_eq!(store.get(id).map(|expense| expense.amount), Ok(5.0));
    }

    #[tokio::test]
    async fn update_fails_when_no_category_is_picked() {
        let store = get_store();
        let id = store
            .add("Food", 5.0, date!(2024 - 01 - 01))
            .expect("Could not add expense");
        let form = ExpenseFormData {
            category: "".to_owned(),
            amount: 6.0,
            date: date!(2024 - 01 - 01),
        };

        let response = update_expense_endpoint(Path(id), State(store.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category cannot be empty");
        assert_eq!(store.get(id).map(|expense| expense.amount), Ok(5.0));
    }

    #[tokio::test]
    async fn update_missing_expense_returns_not_found() {
        let store = get_store();
        let form = ExpenseFormData {
            category: "Food".to_owned(),
            amount: 3.0,
            date: date!(2024 - 01 - 02),
        };

        let response = update_expense_endpoint(Path(99), State(store), Form(form)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
