//! Expense records and expense creation requests

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;
use super::record_date::RecordDate;
use super::Record;

/// A recorded expense as returned by `GET /expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    #[serde(default)]
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub expense_date: RecordDate,
}

impl Record for Expense {
    fn record_id(&self) -> i64 {
        self.id.get()
    }

    fn record_amount(&self) -> Money {
        self.amount
    }

    fn category_ref(&self) -> Option<i64> {
        self.category_id.map(|id| id.get())
    }

    fn record_date(&self) -> &RecordDate {
        &self.expense_date
    }
}

/// Body of `POST /expenses`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub amount: Money,
    pub description: String,
    pub category_id: CategoryId,
    pub notes: String,
    pub expense_date: RecordDate,
}

impl NewExpense {
    /// A new expense dated now
    pub fn new(amount: Money, description: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            amount,
            description: description.into(),
            category_id,
            notes: String::new(),
            expense_date: RecordDate::now(),
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_amount(self.amount)?;
        if self.description.trim().is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }
        if !self.expense_date.raw().is_empty() && self.expense_date.local_date().is_none() {
            return Err(RecordValidationError::InvalidDate(
                self.expense_date.raw().to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_amount(amount: Money) -> Result<(), RecordValidationError> {
    if amount.is_negative() {
        return Err(RecordValidationError::NegativeAmount);
    }
    Ok(())
}

/// Validation errors for expense and income requests
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("amount cannot be negative")]
    NegativeAmount,
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
