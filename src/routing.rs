//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_deleted_expenses_page,
        get_edit_expense_page, get_expenses_page, get_new_expense_page, get_summary_page,
        update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(
            endpoints::DELETED_EXPENSES_VIEW,
            get(get_deleted_expenses_page),
        )
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::POST_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::PUT_EXPENSE, put(update_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        AppState, Error, build_router, endpoints,
        expense::{CategoryMode, CategoryName, Expense, ExpenseStore},
    };

    fn get_test_server() -> (TestServer, ExpenseStore) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state =
            AppState::new(connection, CategoryMode::Fixed).expect("Could not create app state");
        let store = state.expense_store.clone();

        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        (server, store)
    }

    #[tokio::test]
    async fn post_form_creates_expense() {
        let (server, store) = get_test_server();

        let response = server
            .post(endpoints::POST_EXPENSE)
            .form(&[
                ("category", "house rent"),
                ("amount", "12.5"),
                ("date", "2024-01-15"),
            ])
            .await;

        response.assert_status_see_other();
        assert_eq!(response.header("hx-redirect"), "/expenses?notice=added");
        assert_eq!(
            store.get_all(),
            Ok(vec![Expense {
                id: 1,
                category: CategoryName::new_unchecked("House Rent"),
                amount: 12.5,
                date: date!(2024 - 01 - 15),
            }])
        );
    }

    #[tokio::test]
    async fn put_then_delete_same_expense() {
        let (server, store) = get_test_server();
        let id = store
            .add("Food", 5.0, date!(2024 - 01 - 01))
            .expect("Could not add expense");
        let expense_path = endpoints::format_endpoint(endpoints::PUT_EXPENSE, id);

        let response = server
            .put(&expense_path)
            .form(&[
                ("category", "Clothing"),
                ("amount", "42"),
                ("date", "2024-01-02"),
            ])
            .await;

        response.assert_status_see_other();
        assert_eq!(response.header("hx-redirect"), "/expenses?notice=updated");
        assert_eq!(
            store.get(id),
            Ok(Expense {
                id,
                category: CategoryName::new_unchecked("Clothing"),
                amount: 42.0,
                date: date!(2024 - 01 - 02),
            })
        );

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::DELETE_EXPENSE, id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-trigger"), "expense-deleted");
        assert!(response.text().contains("Expense deleted successfully"));
        assert_eq!(store.get(id), Err(Error::NotFound));
        assert_eq!(
            store
                .deleted_history()
                .map(|history| history.iter().map(|expense| expense.id).collect::<Vec<_>>()),
            Ok(vec![id])
        );

        server
            .delete(&expense_path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_expenses_sorted_by_query() {
        let (server, store) = get_test_server();
        for (category, amount, date) in [
            ("Food", 12.5, date!(2024 - 01 - 03)),
            ("House Rent", 800.0, date!(2024 - 01 - 01)),
            ("Clothing", 30.0, date!(2024 - 01 - 02)),
        ] {
            store
                .add(category, amount, date)
                .expect("Could not add expense");
        }

        let response = server
            .get(endpoints::EXPENSES_VIEW)
            .add_query_param("sort", "amount")
            .add_query_param("order", "descending")
            .await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        let categories = html
            .select(
                &Selector::parse("#all-expenses tbody tr[data-expense-id] td:nth-child(2)")
                    .unwrap(),
            )
            .map(|cell| cell.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["House Rent", "Clothing", "Food"]);
    }

    #[tokio::test]
    async fn unknown_path_returns_not_found() {
        let (server, _) = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn root_redirects_through_router() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::EXPENSES_VIEW);
    }
}
