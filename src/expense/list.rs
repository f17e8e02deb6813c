//! Expenses listing page with search and sort controls.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error, endpoints,
    expense::{Expense, ExpenseStore, SortField, SortOrder, delete::EXPENSE_DELETED_EVENT},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE,
        base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
};

/// The query parameters accepted by the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// Only show expenses whose category contains this text in the search results.
    pub search: Option<String>,
    /// The field to sort the expenses table by.
    pub sort: Option<String>,
    /// The order to sort the expenses table in.
    pub order: Option<String>,
    /// The confirmation to show after a form redirects here, see [Notice].
    pub notice: Option<String>,
}

/// A confirmation shown on the expenses page after an expense form succeeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Notice {
    Added,
    Updated,
}

impl Notice {
    /// The expenses page URL that shows this notice.
    pub(super) fn redirect_url(self) -> String {
        format!("{}?notice={}", endpoints::EXPENSES_VIEW, self.as_str())
    }

    fn as_str(self) -> &'static str {
        match self {
            Notice::Added => "added",
            Notice::Updated => "updated",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Notice::Added => "Expense added!",
            Notice::Updated => "Expense updated!",
        }
    }

    /// Unknown values are ignored rather than reported.
    fn from_query(value: &str) -> Option<Self> {
        [Notice::Added, Notice::Updated]
            .into_iter()
            .find(|notice| notice.as_str() == value)
    }
}

/// The sort selected by the user, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sort {
    field: SortField,
    order: SortOrder,
}

/// Render the expenses page.
///
/// The table lists every live expense, most recent first unless the query
/// asks for a sort. An unrecognised sort field or order is reported on the
/// page and the table falls back to the default order.
pub async fn get_expenses_page(
    State(store): State<ExpenseStore>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let (sort, sort_error) = match parse_sort(query.sort.as_deref(), query.order.as_deref()) {
        Ok(sort) => (sort, None),
        Err(error) => (None, Some(error.to_string())),
    };

    let expenses = match sort {
        Some(Sort { field, order }) => store.sort(field, order),
        None => store.get_all(),
    }
    .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;

    let search_results = match query.search.as_deref() {
        Some(search) => Some(
            store
                .search(search)
                .inspect_err(|error| tracing::error!("Failed to search expenses: {error}"))?,
        ),
        None => None,
    };

    Ok(expenses_view(&ExpensesViewModel {
        expenses: &expenses,
        search: query.search.as_deref(),
        search_results: search_results.as_deref(),
        sort,
        sort_error: sort_error.as_deref(),
        notice: query.notice.as_deref().and_then(Notice::from_query),
    })
    .into_response())
}

/// Parse the sort query parameters.
///
/// Returns `None` when neither parameter is given. When only the order is
/// given the expenses are sorted by date.
fn parse_sort(sort: Option<&str>, order: Option<&str>) -> Result<Option<Sort>, Error> {
    let sort = sort.filter(|sort| !sort.trim().is_empty());
    let order = order.filter(|order| !order.trim().is_empty());

    if sort.is_none() && order.is_none() {
        return Ok(None);
    }

    let field = sort.map(str::parse).transpose()?.unwrap_or(SortField::Date);
    let order = order.map(str::parse).transpose()?.unwrap_or_default();

    Ok(Some(Sort { field, order }))
}

struct ExpensesViewModel<'a> {
    expenses: &'a [Expense],
    search: Option<&'a str>,
    search_results: Option<&'a [Expense]>,
    sort: Option<Sort>,
    sort_error: Option<&'a str>,
    notice: Option<Notice>,
}

fn expenses_view(model: &ExpensesViewModel<'_>) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE)
                    {
                        "Add Expense"
                    }
                }

                @if let Some(notice) = model.notice {
                    div
                        id="notice"
                        role="status"
                        class="p-4 text-sm text-green-800 rounded-lg bg-green-50 \
                        dark:bg-gray-800 dark:text-green-400"
                    {
                        (notice.message())
                    }
                }

                div class="flex flex-col lg:flex-row gap-4"
                {
                    (search_form_view(model.search))
                    (sort_form_view(model.sort, model.search))
                }

                @if let Some(sort_error) = model.sort_error {
                    p class="text-red-600 dark:text-red-400" { "Error: " (sort_error) }
                }

                // Both tables reload after a delete from either one.
                div
                    id="expense-tables"
                    class="space-y-4"
                    hx-get=(endpoints::EXPENSES_VIEW)
                    hx-trigger={ (EXPENSE_DELETED_EVENT) " from:body" }
                    hx-include="#sort-form"
                    hx-select="#expense-tables"
                    hx-swap="outerHTML"
                {
                    @if let Some(search_results) = model.search_results {
                        section id="search-results" class="space-y-2"
                        {
                            h2 class="text-lg font-semibold" { "Search Results" }

                            (expense_table_view(search_results, "No results found."))
                        }
                    }

                    section id="all-expenses" class="space-y-2"
                    {
                        h2 class="text-lg font-semibold" { "All Expenses" }

                        (expense_table_view(model.expenses, "No expenses recorded."))
                    }
                }
            }
        }
    );

    base("Expenses", &content)
}

fn search_form_view(search: Option<&str>) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            class="flex items-end gap-2"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search by category" }

                input
                    id="search"
                    type="search"
                    name="search"
                    placeholder="Category"
                    value=[search]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
            }
        }
    )
}

fn sort_form_view(sort: Option<Sort>, search: Option<&str>) -> Markup {
    let selected_field = sort.map(|sort| sort.field);
    let selected_order = sort.map(|sort| sort.order);

    html!(
        form
            id="sort-form"
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            class="flex items-end gap-2"
        {
            @if let Some(search) = search {
                input type="hidden" name="search" value=(search);
            }

            div
            {
                label for="sort" class=(FORM_LABEL_STYLE) { "Sort by" }

                select id="sort" name="sort" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_field.is_none()] { "Default" }

                    @for field in SortField::ALL {
                        option
                            value=(field.column())
                            selected[selected_field == Some(field)]
                        {
                            (field.label())
                        }
                    }
                }
            }

            div
            {
                label for="order" class=(FORM_LABEL_STYLE) { "Order" }

                select id="order" name="order" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_order.is_none()] { "Default" }

                    @for order in [SortOrder::Ascending, SortOrder::Descending] {
                        option
                            value=(order.as_str())
                            selected[selected_order == Some(order)]
                        {
                            @match order {
                                SortOrder::Ascending => { "Ascending" }
                                SortOrder::Descending => { "Descending" }
                            }
                        }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Sort" }
            }
        }
    )
}

fn expense_table_view(expenses: &[Expense], empty_message: &str) -> Markup {
    let table_row = |expense: &Expense| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id);
        let confirm_message = format!(
            "Are you sure you want to delete the {} expense of {} on {}?",
            expense.category,
            format_currency(expense.amount),
            expense.date
        );

        html!(
            tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
            {
                td class=(TABLE_CELL_STYLE) { (expense.date) }
                td class=(TABLE_CELL_STYLE) { (expense.category) }
                td class="px-6 py-4 text-right tabular-nums" { (format_currency(expense.amount)) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(&edit_url, &delete_url, &confirm_message))
                    }
                }
            }
        )
    };

    html!(
        div class="overflow-x-auto dark:bg-gray-800"
        {
            table class=(TABLE_STYLE)
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (table_row(expense))
                    }

                    @if expenses.is_empty() {
                        tr
                        {
                            td
                                colspan="4"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                (empty_message)
                            }
                        }
                    }
                }
            }
        }
    )
}
