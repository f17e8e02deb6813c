//! Page showing the total spent per category.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    expense::{ExpenseStore, ExpenseTotals},
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
};

/// Render the summary page with a total for each category and a grand total.
pub async fn get_summary_page(State(store): State<ExpenseStore>) -> Result<Response, Error> {
    let totals = store
        .totals()
        .inspect_err(|error| tracing::error!("Failed to calculate expense totals: {error}"))?;

    Ok(summary_view(&totals).into_response())
}

fn summary_view(totals: &ExpenseTotals) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-xl"
            {
                h1 class="text-xl font-bold" { "Summary" }

                div class="overflow-x-auto dark:bg-gray-800"
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class="px-6 py-4 text-right" { "Total" }
                            }
                        }

                        tbody
                        {
                            @for (category, total) in &totals.by_category {
                                tr class=(TABLE_ROW_STYLE) data-category=(category)
                                {
                                    td class=(TABLE_CELL_STYLE) { (category) }
                                    td class="px-6 py-4 text-right tabular-nums"
                                    {
                                        (format_currency(*total))
                                    }
                                }
                            }

                            @if totals.by_category.is_empty() {
                                tr
                                {
                                    td
                                        colspan="2"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        "No expenses recorded."
                                    }
                                }
                            }
                        }

                        tfoot
                        {
                            tr class="font-semibold text-gray-900 dark:text-white"
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                                td id="grand-total" class="px-6 py-4 text-right tabular-nums"
                                {
                                    (format_currency(totals.grand_total))
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Summary", &content)
}

#[cfg(test)]
mod summary_page_tests {
    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        expense::{CategoryMode, ExpenseStore, get_summary_page},
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    fn get_store() -> ExpenseStore {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        ExpenseStore::new(connection, CategoryMode::Fixed).expect("Could not create expense store")
    }

    async fn render(store: ExpenseStore) -> Html {
        let response = get_summary_page(State(store))
            .await
            .expect("Could not render summary page");

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        html
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn shows_totals_per_category() {
        let store = get_store();
        store
            .add("Food", 10.005, date!(2024 - 01 - 01))
            .expect("Could not add expense");
        store
            .add("Food", 10.005, date!(2024 - 01 - 02))
            .expect("Could not add expense");
        store
            .add("House Rent", 120.0, date!(2024 - 01 - 01))
            .expect("Could not add expense");

        let html = render(store).await;

        assert_eq!(text_of(&html, "tr[data-category='Food'] td:nth-child(2)"), "$20.02");
        assert_eq!(
            text_of(&html, "tr[data-category='House Rent'] td:nth-child(2)"),
            "$120.00"
        );
        assert_eq!(text_of(&html, "#grand-total"), "$140.02");
    }

    #[tokio::test]
    async fn shows_zero_total_when_empty() {
        let html = render(get_store()).await;

        assert_eq!(text_of(&html, "#grand-total"), "$0.00");
        assert!(
            html.root_element()
                .text()
                .collect::<String>()
                .contains("No expenses recorded.")
        );
    }
}
