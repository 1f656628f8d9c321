//! Core data models for Finboard
//!
//! The entities mirror what the backend sends: expenses, incomes, their
//! categories, and category budgets. `MonthlyBudget` and the bucket types are
//! derived on the client and never leave it.

pub mod bucket;
pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod record_date;

pub use bucket::{
    AllocationPercentages, BucketAllocation, BucketKey, BucketStatus, Buckets, MonthlyBudget,
};
pub use budget::{
    Budget, BudgetValidationError, NewBudget, PeriodType, DEFAULT_NOTIFICATION_THRESHOLD,
};
pub use category::{find_labelled, Category, IncomeCategory, Labelled};
pub use expense::{Expense, NewExpense, RecordValidationError};
pub use ids::{BudgetId, CategoryId, ExpenseId, IncomeCategoryId, IncomeId};
pub use income::{Income, NewIncome};
pub use money::Money;
pub use period::{Period, PeriodParseError};
pub use record_date::RecordDate;

/// A dated money movement that points at a category
///
/// Implemented by [`Expense`] and [`Income`] so that aggregation can run over
/// either without caring which one it has.
pub trait Record {
    fn record_id(&self) -> i64;
    fn record_amount(&self) -> Money;
    fn category_ref(&self) -> Option<i64>;
    fn record_date(&self) -> &RecordDate;
}
