//! Expense creation page and endpoint.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    endpoints,
    expense::{
        ExpenseStore,
        domain::ExpenseFormData,
        form::{ExpenseFormDefaults, expense_form_fields},
        list::Notice,
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Render the expense creation page.
pub async fn get_new_expense_page(State(store): State<ExpenseStore>) -> Response {
    let form = new_expense_form_view(&ExpenseFormDefaults::blank(store.category_mode()), "");

    new_expense_view(form).into_response()
}

/// Handle expense creation form submission.
///
/// On success the client is redirected to the expenses page with an
/// "Expense added!" notice. Invalid input re-renders the form with the error
/// message and the values the user entered.
pub async fn create_expense_endpoint(
    State(store): State<ExpenseStore>,
    Form(form_data): Form<ExpenseFormData>,
) -> Response {
    match store.add(&form_data.category, form_data.amount, form_data.date) {
        Ok(_) => (
            HxRedirect(Notice::Added.redirect_url()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) if error.is_validation_error() => {
            let defaults = ExpenseFormDefaults {
                category_mode: store.category_mode(),
                category: Some(&form_data.category),
                amount: Some(form_data.amount),
                date: form_data.date,
            };

            new_expense_form_view(&defaults, &format!("Error: {error}")).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");

            error.into_alert_response()
        }
    }
}

fn new_expense_view(form: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Add Expense", &content)
}

fn new_expense_form_view(defaults: &ExpenseFormDefaults<'_>, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_EXPENSE)
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

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

#[cfg(test)]
mod new_expense_page_tests {
    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        endpoints,
        expense::{CategoryMode, ExpenseStore, get_new_expense_page},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, must_get_select_options, parse_html_document,
        },
    };

    #[tokio::test]
    async fn render_page_with_category_select() {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let store = ExpenseStore::new(connection, CategoryMode::Fixed)
            .expect("Could not create expense store");

        let response = get_new_expense_page(State(store)).await;

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_eq!(
            must_get_select_options(&form, "category"),
            vec!["Food", "Transportation Fare", "House Rent", "Clothing"]
        );
    }

    #[tokio::test]
    async fn render_page() {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let store = ExpenseStore::new(connection, CategoryMode::FreeForm)
            .expect("Could not create expense store");

        let response = get_new_expense_page(State(store)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_EXPENSE, "hx-post");
        assert_form_input(&form, "category", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_submit_button(&form);
    }
}
