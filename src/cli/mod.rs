//! CLI command handlers
//!
//! Bridges clap argument parsing with [`AppState`]. Handlers fetch what they
//! need, print through `display`, and return errors to `main`.

pub mod analytics;
pub mod budget;
pub mod dashboard;
pub mod records;
pub mod session;

pub use analytics::{
    handle_analytics_command, handle_overview_command, AnalyticsCommands, OverviewCommands,
};
pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::{handle_allocation_command, handle_dashboard_command, AllocationCommands};
pub use records::{handle_expense_command, handle_income_command, ExpenseCommands, IncomeCommands};
pub use session::{handle_login_command, handle_logout_command};

use chrono::NaiveDate;

use crate::api::FinanceApi;
use crate::error::FinboardResult;
use crate::models::{Money, RecordDate};
use crate::state::{AppState, Collection};

/// clap value parser for amounts like "42", "42.50" or "$1,200"
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// clap value parser for `YYYY-MM-DD` dates
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Optional date argument as a record date, defaulting to now
pub(crate) fn record_date(date: Option<NaiveDate>) -> RecordDate {
    date.map(RecordDate::from_date).unwrap_or_else(RecordDate::now)
}

/// Fetch the given collections, warning about any that kept stale data
pub(crate) async fn load<A: FinanceApi>(
    state: &mut AppState<A>,
    which: &[Collection],
) -> FinboardResult<()> {
    let report = state.reload(which).await?;
    for (collection, error) in &report.failed {
        eprintln!("Warning: could not load {}: {}", collection, error);
    }
    Ok(())
}
