//! Category budgets
//!
//! A budget is a user-defined spending limit on one category. The spending
//! figures on it (`spentAmount`, `percentageSpent`, `isExceeded`) are computed
//! by the backend and are read-only here: the client classifies from them but
//! never recomputes them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::{lenient_f64, Money};
use super::record_date::RecordDate;

/// Default notification threshold, in percent
pub const DEFAULT_NOTIFICATION_THRESHOLD: u8 = 80;

/// Budget period type as named by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodType {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

impl PeriodType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
            Self::Custom => "Custom",
        };
        f.write_str(s)
    }
}

fn default_threshold() -> u8 {
    DEFAULT_NOTIFICATION_THRESHOLD
}

/// A category budget as returned by `GET /budgets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub category_name: String,

    #[serde(default)]
    pub budget_limit: Money,

    #[serde(default = "default_threshold")]
    pub notification_threshold: u8,

    #[serde(default)]
    pub period_type: PeriodType,

    #[serde(default)]
    pub start_date: Option<RecordDate>,

    #[serde(default)]
    pub end_date: Option<RecordDate>,

    #[serde(default)]
    pub is_active: Option<bool>,

    // Server-owned figures below; no setters.
    #[serde(default)]
    spent_amount: Money,

    #[serde(default, deserialize_with = "lenient_f64")]
    percentage_spent: f64,

    #[serde(default)]
    is_exceeded: bool,

    #[serde(default)]
    remaining_amount: Option<Money>,

    #[serde(default)]
    is_threshold_reached: Option<bool>,
}

impl Budget {
    pub fn spent_amount(&self) -> Money {
        self.spent_amount
    }

    pub fn percentage_spent(&self) -> f64 {
        self.percentage_spent
    }

    pub fn is_exceeded(&self) -> bool {
        self.is_exceeded
    }

    /// Remaining amount as reported by the backend, else limit minus spent
    pub fn remaining_amount(&self) -> Money {
        self.remaining_amount
            .unwrap_or(self.budget_limit - self.spent_amount)
    }

    pub fn is_threshold_reached(&self) -> Option<bool> {
        self.is_threshold_reached
    }
}

/// Body of `POST /budgets`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub name: String,
    pub budget_limit: Money,
    pub category_id: CategoryId,
    pub notification_threshold: u8,
    pub period_type: PeriodType,
}

impl NewBudget {
    pub fn new(name: impl Into<String>, budget_limit: Money, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            budget_limit,
            category_id,
            notification_threshold: DEFAULT_NOTIFICATION_THRESHOLD,
            period_type: PeriodType::Monthly,
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }
        if self.budget_limit.value() <= 0.0 {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        if self.notification_threshold > 100 {
            return Err(BudgetValidationError::ThresholdOutOfRange(
                self.notification_threshold,
            ));
        }
        Ok(())
    }
}

/// Validation errors for budget requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetValidationError {
    #[error("budget name cannot be empty")]
    EmptyName,
    #[error("budget limit must be greater than zero")]
    NonPositiveLimit,
    #[error("notification threshold must be between 0 and 100, got {0}")]
    ThresholdOutOfRange(u8),
}
