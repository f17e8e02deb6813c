//! Page listing the expenses deleted since the server started.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    expense::{Expense, ExpenseStore},
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
};

/// Render the deleted expenses page, oldest deletion first.
pub async fn get_deleted_expenses_page(
    State(store): State<ExpenseStore>,
) -> Result<Response, Error> {
    let deleted = store
        .deleted_history()
        .inspect_err(|error| tracing::error!("Failed to retrieve deleted expenses: {error}"))?;

    Ok(deleted_expenses_view(&deleted).into_response())
}

fn deleted_expenses_view(deleted: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DELETED_EXPENSES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                h1 class="text-xl font-bold" { "Deleted Expenses" }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Deleted expenses are kept until the server restarts."
                }

                div class="overflow-x-auto dark:bg-gray-800"
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for expense in deleted {
                                tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
                                {
                                    td class=(TABLE_CELL_STYLE) { (expense.id) }
                                    td class=(TABLE_CELL_STYLE) { (expense.date) }
                                    td class=(TABLE_CELL_STYLE) { (expense.category) }
                                    td class="px-6 py-4 text-right tabular-nums"
                                    {
                                        (format_currency(expense.amount))
                                    }
                                }
                            }

                            @if deleted.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        "No deleted expenses."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Deleted Expenses", &content)
}
