use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_amount, Category, Cents, ParseCentsError};

pub type ExpenseId = Uuid;

/// A single expense entry in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub title: String,
    /// Price in cents (never negative)
    pub price: Cents,
    pub category: Category,
    /// Calendar date of the expense, stored as YYYY-MM-DD
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Turn a validated draft into a record with a fresh id.
    pub fn from_draft(draft: ExpenseDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            price: draft.price,
            category: draft.category,
            date: draft.date,
        }
    }

    /// Overwrite the fields present in the patch.
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// A validated candidate for a new expense. It has no id until it is
/// accepted by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub price: Cents,
    pub category: Category,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        price: Cents,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title.into())?,
            price: validate_price(price)?,
            category,
            date,
        })
    }

    /// Re-check a draft that may have been assembled field by field.
    pub fn validate(self) -> Result<Self, ValidationError> {
        Self::new(self.title, self.price, self.category, self.date)
    }

    /// Build a draft from raw form input. Every field is required.
    pub fn from_input(
        title: &str,
        price: &str,
        category: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        Self::new(
            title,
            parse_price(price)?,
            parse_category(category)?,
            parse_date(date)?,
        )
    }
}

/// Replacement values for an existing expense. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub price: Option<Cents>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl ExpensePatch {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price(mut self, price: Cents) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Build a patch from optional raw form input.
    pub fn from_input(
        title: Option<&str>,
        price: Option<&str>,
        category: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: title.map(str::to_string),
            price: price.map(parse_price).transpose()?,
            category: category.map(parse_category).transpose()?,
            date: date.map(parse_date).transpose()?,
        })
    }

    /// Check the present fields with the same rules a draft goes through.
    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: self.title.map(validate_title).transpose()?,
            price: self.price.map(validate_price).transpose()?,
            category: self.category,
            date: self.date,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Cents) -> Result<Cents, ValidationError> {
    if price < 0 {
        return Err(ValidationError::InvalidPrice(ParseCentsError::Negative));
    }
    Ok(price)
}

fn parse_price(input: &str) -> Result<Cents, ValidationError> {
    parse_amount(input).map_err(ValidationError::InvalidPrice)
}

fn parse_category(input: &str) -> Result<Category, ValidationError> {
    Category::from_str(input).ok_or_else(|| ValidationError::UnknownCategory(input.to_string()))
}

fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    InvalidPrice(ParseCentsError),
    UnknownCategory(String),
    InvalidDate(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title must not be empty"),
            ValidationError::InvalidPrice(err) => write!(f, "invalid price: {}", err),
            ValidationError::UnknownCategory(category) => {
                write!(f, "unknown category '{}'", category)
            }
            ValidationError::InvalidDate(date) => {
                write!(f, "invalid date '{}', expected YYYY-MM-DD", date)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
