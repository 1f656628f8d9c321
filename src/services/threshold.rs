//! Budget threshold evaluator
//!
//! Classifies each category budget from the figures the backend computed for
//! it. Nothing here recomputes spending.

use serde::Serialize;
use std::fmt;

use crate::models::Budget;

pub const EXCEEDED_MESSAGE: &str = "Budget exceeded!";
pub const NEAR_LIMIT_MESSAGE: &str = "Approaching budget limit";

/// Alert level of a category budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Ok,
    NearLimit,
    Exceeded,
}

impl BudgetStatus {
    /// Exceeded wins over near-limit; near-limit means the spent percentage
    /// reached the budget's notification threshold.
    pub fn of(budget: &Budget) -> Self {
        if budget.is_exceeded() {
            Self::Exceeded
        } else if budget.percentage_spent() >= f64::from(budget.notification_threshold) {
            Self::NearLimit
        } else {
            Self::Ok
        }
    }

    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            Self::Ok => None,
            Self::NearLimit => Some(NEAR_LIMIT_MESSAGE),
            Self::Exceeded => Some(EXCEEDED_MESSAGE),
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::NearLimit => "Near limit",
            Self::Exceeded => "Exceeded",
        };
        f.write_str(s)
    }
}

/// A budget together with its evaluated status
#[derive(Debug, Clone, Serialize)]
pub struct BudgetView {
    pub budget: Budget,
    pub status: BudgetStatus,
    pub alert: Option<&'static str>,
}

impl BudgetView {
    pub fn new(budget: Budget) -> Self {
        let status = BudgetStatus::of(&budget);
        Self {
            alert: status.alert_message(),
            budget,
            status,
        }
    }

    /// Progress for a bar, as a fraction capped at 1.0
    pub fn progress(&self) -> f64 {
        (self.budget.percentage_spent() / 100.0).clamp(0.0, 1.0)
    }
}

/// Evaluate every budget, keeping input order
pub fn evaluate_budgets(budgets: &[Budget]) -> Vec<BudgetView> {
    budgets.iter().cloned().map(BudgetView::new).collect()
}

/// Only the budgets that need attention, most severe first
pub fn alerts(views: &[BudgetView]) -> Vec<&BudgetView> {
    let mut flagged: Vec<&BudgetView> = views
        .iter()
        .filter(|view| view.status != BudgetStatus::Ok)
        .collect();
    flagged.sort_by(|a, b| b.status.cmp(&a.status));
    flagged
}
