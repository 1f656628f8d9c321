//! Dashboard display: bucket allocation and category budgets

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_bar, format_percentage, heading, money, separator, truncate};
use crate::models::{AllocationPercentages, BucketStatus, MonthlyBudget};
use crate::services::{BudgetStatus, BudgetView};

const BAR_WIDTH: usize = 20;

fn status_marker(status: BucketStatus) -> &'static str {
    match status {
        BucketStatus::Ok => "✓",
        BucketStatus::Warning => "!",
        BucketStatus::Exceeded => "✗",
    }
}

/// The four buckets with allocated, spent and remaining amounts
pub fn format_monthly_budget(budget: &MonthlyBudget, currency: &str) -> String {
    let mut output = heading(&format!("Monthly Budget - {}", budget.period.label()));
    output.push_str(&format!(
        "Total income: {}\n\n",
        money(budget.total_income, currency)
    ));

    output.push_str(&format!(
        "{:<12} {:>5} {:>12} {:>12} {:>12}  {:<w$}  {}\n",
        "Bucket",
        "Share",
        "Allocated",
        "Spent",
        "Remaining",
        "Used",
        "Status",
        w = BAR_WIDTH + 6,
    ));
    output.push_str(&separator(92));
    output.push('\n');

    for (key, bucket) in budget.buckets.iter() {
        let used = bucket.percentage_used();
        output.push_str(&format!(
            "{:<12} {:>5} {:>12} {:>12} {:>12}  {} {:>5}  {} {}\n",
            key.label(),
            format_percentage(bucket.percentage),
            money(bucket.allocated, currency),
            money(bucket.spent, currency),
            money(bucket.remaining(), currency),
            format_bar(used / 100.0, BAR_WIDTH),
            format_percentage(used),
            status_marker(bucket.status()),
            bucket.status(),
        ));
    }

    output.push_str(&separator(92));
    output.push('\n');
    output.push_str(&format!(
        "{:<12} {:>5} {:>12} {:>12}\n",
        "TOTAL",
        "",
        money(budget.total_income, currency),
        money(budget.total_spent(), currency),
    ));

    if budget.total_income.is_zero() {
        output.push_str("\nNo income recorded this month, so nothing is allocated yet.\n");
    }

    output
}

/// The saved split, one line per bucket
pub fn format_allocation(percentages: &AllocationPercentages) -> String {
    let mut output = heading("Budget Allocation");
    for key in crate::models::BucketKey::ALL {
        output.push_str(&format!(
            "  {:<12} {:>6.2}%\n",
            key.label(),
            percentages.get(key)
        ));
    }
    output.push_str(&format!("  {:<12} {:>6.2}%\n", "Total", percentages.sum()));
    output
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Category budgets as a table with progress and status
pub fn format_budget_list(views: &[BudgetView], currency: &str) -> String {
    if views.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = views.iter().map(|view| {
        let budget = &view.budget;
        BudgetRow {
            id: budget.id.to_string(),
            name: truncate(&budget.name, 24),
            category: truncate(&budget.category_name, 20),
            limit: money(budget.budget_limit, currency),
            spent: money(budget.spent_amount(), currency),
            remaining: money(budget.remaining_amount(), currency),
            progress: format!(
                "{} {}",
                format_bar(view.progress(), 10),
                format_percentage(budget.percentage_spent())
            ),
            status: view.status.to_string(),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Budgets that reached their threshold, with the alert text
pub fn format_alerts(alerts: &[&BudgetView], currency: &str) -> String {
    if alerts.is_empty() {
        return "All budgets are within their limits.\n".to_string();
    }

    let mut output = heading("Budget Alerts");
    for view in alerts {
        let icon = match view.status {
            BudgetStatus::Exceeded => "✗",
            BudgetStatus::NearLimit => "!",
            BudgetStatus::Ok => " ",
        };
        output.push_str(&format!(
            "{} {} ({}): {} of {} spent, {}\n",
            icon,
            view.budget.name,
            view.budget.category_name,
            money(view.budget.spent_amount(), currency),
            money(view.budget.budget_limit, currency),
            view.alert.unwrap_or_default(),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Expense, ExpenseId, Income, IncomeId, Money, RecordDate};
    use crate::services::{alerts, compute_monthly_budget, evaluate_budgets};
    use chrono::NaiveDate;

    fn sample_budget() -> MonthlyBudget {
        let incomes = vec![Income {
            id: IncomeId::new(1),
            amount: Money::new(4000.0),
            description: "Salary".into(),
            date: RecordDate::new("2024-01-01"),
            category_id: None,
        }];
        let expenses = vec![Expense {
            id: ExpenseId::new(1),
            amount: Money::new(1800.0),
            description: "Rent".into(),
            category_id: Some(crate::models::CategoryId::new(1)),
            notes: None,
            expense_date: RecordDate::new("2024-01-02"),
        }];
        compute_monthly_budget(
            &incomes,
            &expenses,
            &[Category::new(1, "Rent")],
            &AllocationPercentages::default(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    fn budgets() -> Vec<Budget> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Food", "categoryName": "Groceries", "budgetLimit": 200,
             "spentAmount": 250, "percentageSpent": 125.0, "isExceeded": true},
            {"id": 2, "name": "Fun", "categoryName": "Entertainment", "budgetLimit": 100,
             "spentAmount": 10, "percentageSpent": 10.0, "isExceeded": false}
        ]))
        .unwrap()
    }

    #[test]
    fn test_monthly_budget_lists_every_bucket() {
        let output = format_monthly_budget(&sample_budget(), "$");
        assert!(output.contains("Jan 2024"));
        assert!(output.contains("Essentials"));
        assert!(output.contains("Leisure"));
        assert!(output.contains("$2000.00"));
        assert!(output.contains("warning"));
    }

    #[test]
    fn test_allocation_display() {
        let output = format_allocation(&AllocationPercentages::default());
        assert!(output.contains("Essentials"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("100.00%"));
    }

    #[test]
    fn test_budget_table_and_alerts() {
        let views = evaluate_budgets(&budgets());
        let table = format_budget_list(&views, "$");
        assert!(table.contains("Food"));
        assert!(table.contains("Exceeded"));

        let flagged = alerts(&views);
        let text = format_alerts(&flagged, "$");
        assert!(text.contains("Budget exceeded!"));
        assert!(!text.contains("Fun"));
    }

    #[test]
    fn test_empty_states() {
        assert_eq!(format_budget_list(&[], "$"), "No budgets found.\n");
        assert!(format_alerts(&[], "$").contains("within their limits"));
    }
}
