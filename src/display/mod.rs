//! Display formatting for terminal output
//!
//! Every function here turns a view model into a printable string; none of
//! them compute anything the services have not already computed.

pub mod analytics;
pub mod dashboard;
pub mod format;
pub mod records;

pub use analytics::{
    format_calendar, format_category_chart, format_daily_summary, format_monthly_overview,
    format_trend,
};
pub use dashboard::{format_alerts, format_allocation, format_budget_list, format_monthly_budget};
pub use records::{
    format_category_list, format_expense_list, format_income_categories, format_income_list,
};
