//! Overview summaries
//!
//! Month and day totals plus a per-day calendar, computed over the records
//! already loaded.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, Income, Money, Period, Record};

/// Income against expenses over some span
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

impl Totals {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }

    fn collect<F>(incomes: &[Income], expenses: &[Expense], mut keep: F) -> Self
    where
        F: FnMut(NaiveDate) -> bool,
    {
        let mut totals = Self::default();
        let mut in_span = |record: &dyn Record| {
            record
                .record_date()
                .local_date()
                .is_some_and(&mut keep)
        };

        for income in incomes {
            if in_span(income) {
                totals.income += income.amount;
                totals.income_count += 1;
            }
        }
        for expense in expenses {
            if in_span(expense) {
                totals.expenses += expense.amount;
                totals.expense_count += 1;
            }
        }
        totals
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyOverview {
    pub period: Period,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Totals for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: Totals,
}

/// One cell of the month calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    pub has_transactions: bool,
}

pub fn monthly_overview(
    incomes: &[Income],
    expenses: &[Expense],
    period: Period,
) -> MonthlyOverview {
    MonthlyOverview {
        period,
        totals: Totals::collect(incomes, expenses, |date| period.contains(date)),
    }
}

pub fn daily_summary(incomes: &[Income], expenses: &[Expense], date: NaiveDate) -> DailySummary {
    DailySummary {
        date,
        totals: Totals::collect(incomes, expenses, |d| d == date),
    }
}

/// One entry per day of `period`, in order
pub fn calendar(incomes: &[Income], expenses: &[Expense], period: Period) -> Vec<CalendarDay> {
    let mut days: Vec<CalendarDay> = period
        .days()
        .map(|date| CalendarDay {
            date,
            income: Money::zero(),
            expenses: Money::zero(),
            net: Money::zero(),
            has_transactions: false,
        })
        .collect();

    let start = period.start_date();
    let slot = |record: &dyn Record| -> Option<usize> {
        let date = record.record_date().local_date()?;
        if !period.contains(date) {
            return None;
        }
        usize::try_from((date - start).num_days()).ok()
    };

    for income in incomes {
        if let Some(day) = slot(income).and_then(|i| days.get_mut(i)) {
            day.income += income.amount;
            day.has_transactions = true;
        }
    }
    for expense in expenses {
        if let Some(day) = slot(expense).and_then(|i| days.get_mut(i)) {
            day.expenses += expense.amount;
            day.has_transactions = true;
        }
    }

    for day in &mut days {
        day.net = day.income - day.expenses;
    }
    days
}
