use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    expense::{CategoryMode, ExpenseCategory},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

pub struct ExpenseFormDefaults<'a> {
    pub category_mode: CategoryMode,
    pub category: Option<&'a str>,
    pub amount: Option<f64>,
    pub date: Date,
}

impl ExpenseFormDefaults<'_> {
    /// Empty fields dated today.
    pub fn blank(category_mode: CategoryMode) -> Self {
        Self {
            category_mode,
            category: None,
            amount: None,
            date: today(),
        }
    }
}

/// The current date in the server's local time zone, or UTC if the local
/// offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    // A category saved in free-form mode has no fixed option. It is shown as a
    // disabled empty choice so the required select stays invalid until the
    // user picks a fixed category.
    let unlisted_category = defaults.category.filter(|category| {
        ExpenseCategory::ALL
            .iter()
            .all(|fixed| fixed.as_str() != *category)
    });

    html! {
        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            @match defaults.category_mode {
                CategoryMode::Fixed => {
                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @if let Some(unlisted) = unlisted_category {
                            option value="" selected disabled
                            {
                                (unlisted) " (not a fixed category)"
                            }
                        }

                        @for category in ExpenseCategory::ALL {
                            @if defaults.category.is_some_and(|selected| selected == category.as_str()) {
                                option value=(category) selected { (category) }
                            } @else {
                                option value=(category) { (category) }
                            }
                        }
                    }
                }
                CategoryMode::FreeForm => {
                    input
                        name="category"
                        id="category"
                        type="text"
                        placeholder="Category"
                        value=[defaults.category]
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                value=[amount_str.as_deref()]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
