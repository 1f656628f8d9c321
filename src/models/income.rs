//! Income records and income creation requests

use serde::{Deserialize, Serialize};

use super::expense::{validate_amount, RecordValidationError};
use super::ids::{IncomeCategoryId, IncomeId};
use super::money::Money;
use super::record_date::RecordDate;
use super::Record;

/// A recorded income as returned by `GET /incomes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: IncomeId,

    #[serde(default)]
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub date: RecordDate,

    #[serde(default)]
    pub category_id: Option<IncomeCategoryId>,
}

impl Record for Income {
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
        &self.date
    }
}

/// Body of `POST /incomes`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub amount: Money,
    pub description: String,
    pub date: RecordDate,
    pub category_id: IncomeCategoryId,
}

impl NewIncome {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_amount(self.amount)?;
        if self.description.trim().is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }
        if self.date.local_date().is_none() {
            return Err(RecordValidationError::InvalidDate(self.date.raw().to_string()));
        }
        Ok(())
    }
}
