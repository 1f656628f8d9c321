//! CSV export of analytics series

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FinboardError, FinboardResult};
use crate::services::TrendSeries;

fn export_err(e: impl std::fmt::Display) -> FinboardError {
    FinboardError::Export(e.to_string())
}

/// Category totals as `Type,Category,Total` rows
///
/// Expense categories come first, then income categories, each in name order.
pub fn export_categories_csv<W: Write>(
    writer: W,
    expenses_by_category: &BTreeMap<String, f64>,
    income_by_category: &BTreeMap<String, f64>,
) -> FinboardResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Type", "Category", "Total"])
        .map_err(export_err)?;

    let rows = expenses_by_category
        .iter()
        .map(|row| ("expense", row))
        .chain(income_by_category.iter().map(|row| ("income", row)));
    for (kind, (name, total)) in rows {
        let total = format!("{:.2}", total);
        csv.write_record([kind, name.as_str(), total.as_str()])
            .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}

/// Monthly trend as `Month,Income,Expenses,Net` rows
pub fn export_trend_csv<W: Write>(writer: W, trend: &TrendSeries) -> FinboardResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Month", "Income", "Expenses", "Net"])
        .map_err(export_err)?;

    let net = trend.net();
    for (i, month) in trend.labels.iter().enumerate() {
        let amounts = [trend.income.get(i), trend.expenses.get(i), net.get(i)]
            .map(|value| format!("{:.2}", value.copied().unwrap_or(0.0)));
        csv.write_record([
            month.as_str(),
            amounts[0].as_str(),
            amounts[1].as_str(),
            amounts[2].as_str(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_csv_quotes_names() {
        let mut expenses = BTreeMap::new();
        expenses.insert("Bills & Utilities".to_string(), 120.0);
        expenses.insert("Food, Dining".to_string(), 33.456);
        let mut income = BTreeMap::new();
        income.insert("Salary".to_string(), 4000.0);

        let mut buffer = Vec::new();
        export_categories_csv(&mut buffer, &expenses, &income).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Type,Category,Total");
        assert_eq!(lines[1], "expense,Bills & Utilities,120.00");
        assert_eq!(lines[2], "expense,\"Food, Dining\",33.46");
        assert_eq!(lines[3], "income,Salary,4000.00");
    }

    #[test]
    fn test_trend_csv() {
        let trend = TrendSeries {
            labels: vec!["2024-01".into(), "2024-02".into()],
            income: vec![3000.0, 0.0],
            expenses: vec![1000.0, 250.0],
        };
        let mut buffer = Vec::new();
        export_trend_csv(&mut buffer, &trend).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "Month,Income,Expenses,Net\n2024-01,3000.00,1000.00,2000.00\n2024-02,0.00,250.00,-250.00\n"
        );
    }
}
