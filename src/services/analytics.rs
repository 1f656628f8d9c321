//! Analytics aggregator
//!
//! Groups records by category and by month into the series the dashboard
//! charts are drawn from. All aggregation covers every record loaded, not
//! just the current month.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::warn;

use super::allocation::category_names;
use crate::models::{Labelled, Money, Period, Record};

/// Label for records whose category cannot be resolved
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Labels and values ready to hand to a chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Label and value pairs
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let (labels, values) = iter
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, values }
    }
}

/// Income and expenses per month over a shared axis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    /// `"YYYY-MM"` keys, ascending
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
}

impl TrendSeries {
    /// Net (income minus expenses) per month
    pub fn net(&self) -> Vec<f64> {
        self.income
            .iter()
            .zip(&self.expenses)
            .map(|(i, e)| i - e)
            .collect()
    }

    /// Month keys rendered as "Jan 2024"; unparseable keys are kept as-is
    pub fn display_labels(&self) -> Vec<String> {
        self.labels.iter().map(|key| month_label(key)).collect()
    }
}

/// Total amount per category name
///
/// Records pointing at no known category are grouped under
/// [`UNKNOWN_CATEGORY`].
pub fn aggregate_by_category<R, C>(records: &[R], categories: &[C]) -> BTreeMap<String, f64>
where
    R: Record,
    C: Labelled,
{
    let names = category_names(categories);
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();

    for record in records {
        let name = record
            .category_ref()
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNKNOWN_CATEGORY);
        *totals.entry(name.to_string()).or_default() += record.record_amount();
    }

    totals
        .into_iter()
        .map(|(name, total)| (name, total.value()))
        .collect()
}

/// Total amount per `"YYYY-MM"` month, ascending
///
/// Records with unreadable dates are skipped.
pub fn aggregate_by_month<R: Record>(records: &[R]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<Period, Money> = BTreeMap::new();

    for record in records {
        match record.record_date().local_date() {
            Some(date) => {
                *totals.entry(Period::containing(date)).or_default() += record.record_amount();
            }
            None => warn!(
                record_id = record.record_id(),
                raw = record.record_date().raw(),
                "Skipping record with unreadable date in monthly aggregation"
            ),
        }
    }

    totals
        .into_iter()
        .map(|(period, total)| (period.month_key(), total.value()))
        .collect()
}

/// Category totals as a chart series, largest first
pub fn category_series<R, C>(records: &[R], categories: &[C]) -> ChartSeries
where
    R: Record,
    C: Labelled,
{
    let mut totals: Vec<(String, f64)> = aggregate_by_category(records, categories)
        .into_iter()
        .collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    totals.into_iter().collect()
}

/// Monthly totals as a chart series
pub fn monthly_series<R: Record>(records: &[R]) -> ChartSeries {
    aggregate_by_month(records).into_iter().collect()
}

/// Income and expenses on the union of their months, missing months as 0
pub fn combined_trend<I: Record, E: Record>(incomes: &[I], expenses: &[E]) -> TrendSeries {
    let income: BTreeMap<String, f64> = aggregate_by_month(incomes).into_iter().collect();
    let spent: BTreeMap<String, f64> = aggregate_by_month(expenses).into_iter().collect();

    let months: BTreeSet<&String> = income.keys().chain(spent.keys()).collect();

    let mut trend = TrendSeries::default();
    for month in months {
        trend.income.push(income.get(month).copied().unwrap_or(0.0));
        trend.expenses.push(spent.get(month).copied().unwrap_or(0.0));
        trend.labels.push(month.clone());
    }
    trend
}

/// "2024-01" becomes "Jan 2024"
pub fn month_label(key: &str) -> String {
    Period::parse(key)
        .map(|period| period.label())
        .unwrap_or_else(|_| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, CategoryId, Expense, ExpenseId, Income, IncomeCategory, IncomeCategoryId,
        IncomeId, RecordDate,
    };
    use proptest::prelude::*;

    fn expense(id: i64, amount: f64, category: Option<i64>, date: &str) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount: Money::new(amount),
            description: String::new(),
            category_id: category.map(CategoryId::new),
            notes: None,
            expense_date: RecordDate::new(date),
        }
    }

    fn income(id: i64, amount: f64, date: &str) -> Income {
        Income {
            id: IncomeId::new(id),
            amount: Money::new(amount),
            description: String::new(),
            date: RecordDate::new(date),
            category_id: Some(IncomeCategoryId::new(1)),
        }
    }

    #[test]
    fn test_aggregate_by_category() {
        let categories = vec![Category::new(1, "Groceries"), Category::new(2, "Travel")];
        let expenses = vec![
            expense(1, 40.0, Some(1), "2024-01-02"),
            expense(2, 60.0, Some(1), "2023-06-02"),
            expense(3, 300.0, Some(2), "2024-01-05"),
            expense(4, 5.0, Some(42), "2024-01-05"),
            expense(5, 7.5, None, "bad"),
        ];

        let totals = aggregate_by_category(&expenses, &categories);
        assert_eq!(totals.get("Groceries"), Some(&100.0));
        assert_eq!(totals.get("Travel"), Some(&300.0));
        assert_eq!(totals.get("Unknown"), Some(&12.5));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn test_income_by_income_category() {
        let categories = vec![IncomeCategory::new(1, "Salary")];
        let incomes = vec![income(1, 2000.0, "2024-01-01"), income(2, 2100.0, "2024-02-01")];
        let totals = aggregate_by_category(&incomes, &categories);
        assert_eq!(totals.get("Salary"), Some(&4100.0));
    }

    #[test]
    fn test_aggregate_by_month_sorted_and_padded() {
        let expenses = vec![
            expense(1, 20.0, None, "2024-03-05"),
            expense(2, 10.0, None, "2024-01-15T10:30:00"),
            expense(3, 5.0, None, "2024-01-20"),
            expense(4, 99.0, None, "yesterday"),
        ];

        let months = aggregate_by_month(&expenses);
        assert_eq!(
            months,
            vec![("2024-01".to_string(), 15.0), ("2024-03".to_string(), 20.0)]
        );
    }

    #[test]
    fn test_aggregate_by_month_two_months() {
        let expenses = vec![
            expense(1, 60.0, Some(1), "2024-02-03"),
            expense(2, 100.0, Some(2), "2024-01-09"),
            expense(3, 90.0, None, "2024-02-27"),
        ];

        assert_eq!(
            aggregate_by_month(&expenses),
            vec![("2024-01".to_string(), 100.0), ("2024-02".to_string(), 150.0)]
        );
    }

    #[test]
    fn test_combined_trend_fills_gaps() {
        let incomes = vec![income(1, 3000.0, "2024-01-01"), income(2, 3000.0, "2024-03-01")];
        let expenses = vec![expense(1, 400.0, None, "2024-02-10")];

        let trend = combined_trend(&incomes, &expenses);
        assert_eq!(trend.labels, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(trend.income, vec![3000.0, 0.0, 3000.0]);
        assert_eq!(trend.expenses, vec![0.0, 400.0, 0.0]);
        assert_eq!(trend.net(), vec![3000.0, -400.0, 3000.0]);
        assert_eq!(
            trend.display_labels(),
            vec!["Jan 2024", "Feb 2024", "Mar 2024"]
        );
    }

    #[test]
    fn test_category_series_largest_first() {
        let categories = vec![Category::new(1, "Rent"), Category::new(2, "Shopping")];
        let expenses = vec![
            expense(1, 50.0, Some(2), "2024-01-01"),
            expense(2, 900.0, Some(1), "2024-01-01"),
        ];
        let series = category_series(&expenses, &categories);
        assert_eq!(series.labels, vec!["Rent", "Shopping"]);
        assert_eq!(series.values, vec![900.0, 50.0]);
        assert_eq!(series.total(), 950.0);
    }

    #[test]
    fn test_month_label_passthrough() {
        assert_eq!(month_label("2024-12"), "Dec 2024");
        assert_eq!(month_label("whenever"), "whenever");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_monthly_totals_are_sorted_unique_and_complete(
            entries in prop::collection::vec((2020i32..2026, 1u32..=12, 1u32..=28, 0u32..100_000), 0..40)
        ) {
            let expenses: Vec<Expense> = entries
                .iter()
                .enumerate()
                .map(|(i, (y, m, d, cents))| {
                    expense(i as i64, *cents as f64 / 100.0, None, &format!("{y:04}-{m:02}-{d:02}"))
                })
                .collect();

            let months = aggregate_by_month(&expenses);

            for pair in months.windows(2) {
                prop_assert!(pair[0].0 < pair[1].0);
            }

            let distinct: BTreeSet<(i32, u32)> = entries.iter().map(|(y, m, _, _)| (*y, *m)).collect();
            prop_assert_eq!(months.len(), distinct.len());

            let expected: f64 = expenses.iter().map(|e| e.amount.value()).sum();
            let actual: f64 = months.iter().map(|(_, v)| v).sum();
            prop_assert!((expected - actual).abs() < 1e-6);
        }
    }
}
