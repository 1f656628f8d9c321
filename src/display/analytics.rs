//! Analytics and overview display
//!
//! Charts are drawn as text bars; the series themselves come from
//! `services::analytics`.

use chrono::Datelike;

use super::format::{format_bar, format_percentage, heading, money, separator, truncate};
use crate::models::Money;
use crate::services::{CalendarDay, ChartSeries, DailySummary, MonthlyOverview, TrendSeries};

const BAR_WIDTH: usize = 30;

/// Category breakdown with share of total and a bar per category
pub fn format_category_chart(title: &str, series: &ChartSeries, currency: &str) -> String {
    let mut output = heading(title);
    if series.is_empty() {
        output.push_str("No data.\n");
        return output;
    }

    let total = series.total();
    let max = series.values.iter().copied().fold(0.0_f64, f64::max);

    for (label, value) in series.points() {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let fill = if max > 0.0 { value / max } else { 0.0 };
        output.push_str(&format!(
            "{:<20} {:>12} {:>5}  {}\n",
            truncate(label, 20),
            money(Money::new(value), currency),
            format_percentage(share),
            format_bar(fill, BAR_WIDTH),
        ));
    }
    output.push_str(&separator(72));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>12}\n",
        "TOTAL",
        money(Money::new(total), currency)
    ));
    output
}

/// Income against expenses per month
pub fn format_trend(trend: &TrendSeries, currency: &str) -> String {
    let mut output = heading("Income vs Expenses");
    if trend.labels.is_empty() {
        output.push_str("No data.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<10} {:>12} {:>12} {:>12}\n",
        "Month", "Income", "Expenses", "Net"
    ));
    output.push_str(&separator(49));
    output.push('\n');

    let labels = trend.display_labels();
    for (i, label) in labels.iter().enumerate() {
        let income = trend.income.get(i).copied().unwrap_or(0.0);
        let expenses = trend.expenses.get(i).copied().unwrap_or(0.0);
        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12}\n",
            label,
            money(Money::new(income), currency),
            money(Money::new(expenses), currency),
            money(Money::new(income - expenses), currency),
        ));
    }
    output
}

pub fn format_monthly_overview(overview: &MonthlyOverview, currency: &str) -> String {
    let totals = &overview.totals;
    let mut output = heading(&format!("Overview - {}", overview.period.label()));
    output.push_str(&format!(
        "  Income:    {:>12}  ({} record(s))\n",
        money(totals.income, currency),
        totals.income_count
    ));
    output.push_str(&format!(
        "  Expenses:  {:>12}  ({} record(s))\n",
        money(totals.expenses, currency),
        totals.expense_count
    ));
    output.push_str(&format!("  Net:       {:>12}\n", money(totals.net(), currency)));
    output
}

pub fn format_daily_summary(summary: &DailySummary, currency: &str) -> String {
    let totals = &summary.totals;
    format!(
        "{}: income {} ({}), expenses {} ({}), net {}\n",
        summary.date.format("%a %Y-%m-%d"),
        money(totals.income, currency),
        totals.income_count,
        money(totals.expenses, currency),
        totals.expense_count,
        money(totals.net(), currency),
    )
}

/// Days with activity, one line each; quiet days are skipped
pub fn format_calendar(days: &[CalendarDay], currency: &str) -> String {
    let active: Vec<&CalendarDay> = days.iter().filter(|d| d.has_transactions).collect();
    if active.is_empty() {
        return "No transactions this month.\n".to_string();
    }

    let mut output = format!(
        "{:<10} {:>12} {:>12} {:>12}\n",
        "Day", "Income", "Expenses", "Net"
    );
    output.push_str(&separator(49));
    output.push('\n');
    for day in active {
        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12}\n",
            format!("{} {:>2}", day.date.format("%a"), day.date.day()),
            money(day.income, currency),
            money(day.expenses, currency),
            money(day.net, currency),
        ));
    }
    output
}
