//! Expense recording, editing, searching and summarising.

mod create;
mod db;
mod delete;
mod deleted;
mod domain;
mod edit;
mod form;
mod list;
mod store;
mod summary;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use db::{ExpenseTotals, create_expense_table};
pub use delete::delete_expense_endpoint;
pub use deleted::get_deleted_expenses_page;
pub use domain::{
    CategoryMode, CategoryName, Expense, ExpenseCategory, ExpenseId, SortField, SortOrder,
    round_to_cents,
};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use list::get_expenses_page;
pub use store::ExpenseStore;
pub use summary::get_summary_page;
