//! Service layer for Finboard
//!
//! Pure computations over data already fetched from the backend: bucket
//! classification, period filtering, monthly allocation, budget alerts,
//! analytics series and overview summaries. Nothing here does I/O.

pub mod allocation;
pub mod analytics;
pub mod classifier;
pub mod overview;
pub mod period;
pub mod threshold;

pub use allocation::{compute_for_period, compute_monthly_budget};
pub use analytics::{
    aggregate_by_category, aggregate_by_month, combined_trend, ChartSeries, TrendSeries,
};
pub use classifier::classify_bucket;
pub use overview::{
    calendar, daily_summary, monthly_overview, CalendarDay, DailySummary, MonthlyOverview,
};
pub use period::{in_current_period, parse_or_current};
pub use threshold::{alerts, evaluate_budgets, BudgetStatus, BudgetView};
