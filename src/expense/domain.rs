//! Core expense domain types.

use std::{fmt::Display, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategory] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategory)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty
    /// invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of categories accepted in [CategoryMode::Fixed].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    /// Groceries, takeaways and eating out.
    Food,
    /// Bus, train, taxi and other fares.
    TransportationFare,
    /// Rent for the place you live in.
    HouseRent,
    /// Clothes and shoes.
    Clothing,
}

impl ExpenseCategory {
    /// All fixed categories in the order they are offered to the user.
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Food,
        ExpenseCategory::TransportationFare,
        ExpenseCategory::HouseRent,
        ExpenseCategory::Clothing,
    ];

    /// The display name, which is also the name stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::TransportationFare => "Transportation Fare",
            ExpenseCategory::HouseRent => "House Rent",
            ExpenseCategory::Clothing => "Clothing",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    /// Match `s` against the category names, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(Error::EmptyCategory);
        }

        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownCategory(trimmed.to_owned()))
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls which category names the expense store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CategoryMode {
    /// Only the names in [ExpenseCategory::ALL] are accepted.
    #[default]
    Fixed,
    /// Any non-empty name is accepted.
    FreeForm,
}

impl CategoryMode {
    /// Validate `raw` and return the name to store.
    ///
    /// In [CategoryMode::Fixed] the canonical spelling of the matching
    /// category is returned, e.g. "house rent" becomes "House Rent".
    ///
    /// # Errors
    /// Returns [Error::EmptyCategory] for an empty name, or
    /// [Error::UnknownCategory] if the mode is fixed and `raw` is not one of
    /// the fixed categories.
    pub fn validate(&self, raw: &str) -> Result<CategoryName, Error> {
        match self {
            CategoryMode::FreeForm => CategoryName::new(raw),
            CategoryMode::Fixed => {
                let category: ExpenseCategory = raw.parse()?;
                Ok(CategoryName::new_unchecked(category.as_str()))
            }
        }
    }
}

/// Round `amount` to two decimal places.
///
/// Rounding uses the shortest decimal representation of `amount`, i.e. the
/// digits a user would have typed, and rounds midpoints away from zero.
/// This way `10.005` becomes `10.01` even though the nearest `f64` is
/// slightly less than `10.005`.
///
/// Returns `None` if `amount` is not finite or too large to represent.
pub fn round_to_cents(amount: f64) -> Option<f64> {
    if !amount.is_finite() {
        return None;
    }

    let decimal = Decimal::from_str(&amount.to_string()).ok()?;

    // Going through the string keeps the result identical to the f64 literal
    // with the same digits.
    decimal
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .ok()
}

/// Round `amount` to cents and check that it is greater than zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the rounded amount is not a positive number,
/// or [Error::AmountTooLarge] if it is too large to store exactly.
pub(crate) fn validate_amount(amount: f64) -> Result<f64, Error> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount(amount));
    }

    match round_to_cents(amount) {
        Some(rounded) if rounded > 0.0 => Ok(rounded),
        Some(_) => Err(Error::InvalidAmount(amount)),
        None => Err(Error::AmountTooLarge(amount)),
    }
}

/// A single expense: money spent on something in a category on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the store when the expense was recorded.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub category: CategoryName,
    /// How much was spent, rounded to two decimal places.
    pub amount: f64,
    /// When the money was spent.
    pub date: Date,
}

impl Expense {
    /// Whether the category contains `query`, ignoring case.
    ///
    /// An empty query matches every expense.
    pub fn category_contains(&self, query: &str) -> bool {
        self.category
            .as_ref()
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// The field to sort expenses by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Alphabetical order of the category name.
    Category,
    /// Numerical order of the amount.
    Amount,
    /// Chronological order of the date.
    Date,
}

impl SortField {
    /// All sortable fields in the order they are offered to the user.
    pub const ALL: [SortField; 3] = [SortField::Category, SortField::Amount, SortField::Date];

    /// The column name in the expense table.
    pub(crate) fn column(&self) -> &'static str {
        match self {
            SortField::Category => "category",
            SortField::Amount => "amount",
            SortField::Date => "date",
        }
    }

    /// The label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Category => "Category",
            SortField::Amount => "Amount",
            SortField::Date => "Date",
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.column().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidSortField(s.to_owned()))
    }
}

/// The order to sort expenses in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    #[default]
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

impl SortOrder {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }

    /// The value used for this order in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            _ => Err(Error::InvalidSortOrder(s.to_owned())),
        }
    }
}

/// Form data for expense creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub category: String,
    pub amount: f64,
    pub date: Date,
}


#[cfg(test)]
mod category_mode_tests {
    use crate::{
        Error,
        expense::{CategoryMode, CategoryName},
    };

    #[test]
    fn fixed_mode_returns_canonical_name() {
        let name = CategoryMode::Fixed.validate("transportation fare");

        assert_eq!(name, Ok(CategoryName::new_unchecked("Transportation Fare")));
    }

    #[test]
    fn fixed_mode_rejects_unknown_category() {
        let name = CategoryMode::Fixed.validate("Coffee");

        assert_eq!(name, Err(Error::UnknownCategory("Coffee".to_owned())));
    }

    #[test]
    fn fixed_mode_rejects_empty_category() {
        let name = CategoryMode::Fixed.validate("  ");

        assert_eq!(name, Err(Error::EmptyCategory));
    }

    #[test]
    fn free_form_mode_accepts_any_name() {
        let name = CategoryMode::FreeForm.validate("Coffee");

        assert_eq!(name, Ok(CategoryName::new_unchecked("Coffee")));
    }
}
