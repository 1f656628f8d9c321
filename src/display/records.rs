//! Expense and income listings

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{money, truncate};
use crate::models::{Category, Expense, Income, IncomeCategory, Money, RecordDate};
use crate::services::allocation::category_names;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Dates as the configured format when readable, otherwise the raw value
fn display_date(date: &RecordDate, date_format: &str) -> String {
    date.local_date()
        .map(|d| d.format(date_format).to_string())
        .unwrap_or_else(|| date.raw().to_string())
}

fn render(rows: Vec<RecordRow>, total: Money, currency: &str, empty: &str) -> String {
    if rows.is_empty() {
        return format!("{}\n", empty);
    }
    let count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!(
        "{}\n{} record(s), total {}\n",
        table,
        count,
        money(total, currency)
    )
}

pub fn format_expense_list(
    expenses: &[Expense],
    categories: &[Category],
    currency: &str,
    date_format: &str,
) -> String {
    let names = category_names(categories);
    let rows = expenses
        .iter()
        .map(|e| RecordRow {
            id: e.id.to_string(),
            date: display_date(&e.expense_date, date_format),
            description: truncate(&e.description, 30),
            category: e
                .category_id
                .and_then(|id| names.get(&id.get()).copied())
                .unwrap_or("-")
                .to_string(),
            amount: money(e.amount, currency),
        })
        .collect();
    let total = expenses.iter().map(|e| e.amount).sum();
    render(rows, total, currency, "No expenses found.")
}

pub fn format_income_list(
    incomes: &[Income],
    categories: &[IncomeCategory],
    currency: &str,
    date_format: &str,
) -> String {
    let names = category_names(categories);
    let rows = incomes
        .iter()
        .map(|i| RecordRow {
            id: i.id.to_string(),
            date: display_date(&i.date, date_format),
            description: truncate(&i.description, 30),
            category: i
                .category_id
                .and_then(|id| names.get(&id.get()).copied())
                .unwrap_or("-")
                .to_string(),
            amount: money(i.amount, currency),
        })
        .collect();
    let total = incomes.iter().map(|i| i.amount).sum();
    render(rows, total, currency, "No incomes found.")
}

/// Income categories with the backend's per-category totals
pub fn format_income_categories(categories: &[IncomeCategory], currency: &str) -> String {
    if categories.is_empty() {
        return "No income categories found.\n".to_string();
    }
    let mut output = String::new();
    for category in categories {
        output.push_str(&format!(
            "{:>5}  {:<24} {:>12}  ({} record(s))\n",
            category.id.to_string(),
            truncate(&category.name, 24),
            money(category.total_amount, currency),
            category.count,
        ));
    }
    output
}

pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }
    categories
        .iter()
        .map(|c| {
            format!(
                "{:>5}  {} {}\n",
                c.id.to_string(),
                c.icon_name.as_deref().unwrap_or(" "),
                c.name
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, ExpenseId};

    #[test]
    fn test_expense_list() {
        let expenses = vec![
            Expense {
                id: ExpenseId::new(7),
                amount: Money::new(42.5),
                description: "Weekly shop".into(),
                category_id: Some(CategoryId::new(1)),
                notes: None,
                expense_date: RecordDate::new("2024-01-15T10:30:00"),
            },
            Expense {
                id: ExpenseId::new(8),
                amount: Money::new(10.0),
                description: "Mystery".into(),
                category_id: Some(CategoryId::new(99)),
                notes: None,
                expense_date: RecordDate::new("someday"),
            },
        ];
        let output =
            format_expense_list(&expenses, &[Category::new(1, "Groceries")], "$", "%Y-%m-%d");

        assert!(output.contains("#7"));
        assert!(output.contains("2024-01-15"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("someday"));
        assert!(output.contains("2 record(s), total $52.50"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_income_list(&[], &[], "$", "%Y-%m-%d"), "No incomes found.\n");
        assert_eq!(format_category_list(&[]), "No categories found.\n");
    }

    #[test]
    fn test_income_categories_show_totals() {
        let mut salary = IncomeCategory::new(1, "Salary");
        salary.total_amount = Money::new(5400.0);
        salary.count = 2;
        let output = format_income_categories(&[salary], "€");
        assert!(output.contains("€5400.00"));
        assert!(output.contains("2 record(s)"));
    }
}
