//! Allocation calculator
//!
//! Splits the month's income across the four buckets and adds up how much of
//! each bucket the month's expenses have used.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use super::classifier::classify_bucket;
use super::period::record_in_period;
use crate::models::{
    AllocationPercentages, BucketAllocation, BucketKey, Buckets, Category, Expense, Income,
    Labelled, Money, MonthlyBudget, Period,
};

/// Category name used when an expense points at no known category
pub const UNRESOLVED_CATEGORY: &str = "Other";

/// Compute the monthly budget for the month containing `reference`
///
/// Pure: the same inputs always give the same output.
pub fn compute_monthly_budget(
    incomes: &[Income],
    expenses: &[Expense],
    categories: &[Category],
    percentages: &AllocationPercentages,
    reference: NaiveDate,
) -> MonthlyBudget {
    compute_for_period(
        incomes,
        expenses,
        categories,
        percentages,
        Period::containing(reference),
    )
}

/// Compute the monthly budget for an explicit period
pub fn compute_for_period(
    incomes: &[Income],
    expenses: &[Expense],
    categories: &[Category],
    percentages: &AllocationPercentages,
    period: Period,
) -> MonthlyBudget {
    let total_income: Money = incomes
        .iter()
        .filter(|income| record_in_period(*income, period))
        .map(|income| income.amount)
        .sum();

    let allocation = |bucket: BucketKey| {
        let percentage = percentages.get(bucket);
        BucketAllocation {
            allocated: total_income.percent_of(percentage),
            spent: Money::zero(),
            percentage,
        }
    };
    let mut buckets = Buckets {
        essentials: allocation(BucketKey::Essentials),
        growth: allocation(BucketKey::Growth),
        emergency: allocation(BucketKey::Emergency),
        leisure: allocation(BucketKey::Leisure),
    };

    let names = category_names(categories);
    for expense in expenses
        .iter()
        .filter(|expense| record_in_period(*expense, period))
    {
        let name = resolve_category_name(&names, expense);
        buckets.get_mut(classify_bucket(name)).spent += expense.amount;
    }

    MonthlyBudget {
        period,
        total_income,
        buckets,
    }
}

pub(crate) fn category_names<C: Labelled>(categories: &[C]) -> HashMap<i64, &str> {
    categories.iter().map(|c| (c.key(), c.label())).collect()
}

fn resolve_category_name<'a>(names: &HashMap<i64, &'a str>, expense: &Expense) -> &'a str {
    let resolved = expense
        .category_id
        .and_then(|id| names.get(&id.get()).copied());

    match resolved {
        Some(name) => name,
        None => {
            debug!(
                expense_id = expense.id.get(),
                category_id = ?expense.category_id.map(|id| id.get()),
                "Expense category not resolved, treating as '{}'",
                UNRESOLVED_CATEGORY
            );
            UNRESOLVED_CATEGORY
        }
    }
}
