//! Analytics, overview and export commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use super::{load, parse_date};
use crate::api::FinanceApi;
use crate::display::{
    format_calendar, format_category_chart, format_daily_summary, format_monthly_overview,
    format_trend,
};
use crate::error::FinboardResult;
use crate::export::{
    export_analytics_json, export_analytics_yaml, export_categories_csv, export_trend_csv,
    AnalyticsExport, ExportFormat,
};
use crate::services::{self, analytics};
use crate::state::{AppState, Collection};

/// Analytics subcommands
#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Totals per category, largest first
    Categories {
        /// Show income categories instead of expense categories
        #[arg(long)]
        income: bool,
    },

    /// Expense totals per month
    Months,

    /// Income against expenses per month
    Trend,

    /// Export analytics to a file or stdout
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// For CSV, export the monthly trend instead of category totals
        #[arg(long)]
        trend: bool,
    },
}

/// Overview subcommands
#[derive(Subcommand)]
pub enum OverviewCommands {
    /// Totals for a month
    Month {
        /// Month ("current", "last" or YYYY-MM)
        period: Option<String>,
    },

    /// Totals for one day
    Day {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Day-by-day activity for a month
    Calendar {
        /// Month ("current", "last" or YYYY-MM)
        period: Option<String>,
    },
}

const RECORD_COLLECTIONS: [Collection; 4] = [
    Collection::Categories,
    Collection::Expenses,
    Collection::Incomes,
    Collection::IncomeCategories,
];

pub async fn handle_analytics_command<A: FinanceApi>(
    state: &mut AppState<A>,
    cmd: AnalyticsCommands,
) -> FinboardResult<()> {
    let currency = state.settings().currency_symbol.clone();

    match cmd {
        AnalyticsCommands::Categories { income } => {
            load(state, &RECORD_COLLECTIONS).await?;
            let snapshot = state.snapshot();
            let output = if income {
                let series =
                    analytics::category_series(&snapshot.incomes, &snapshot.income_categories);
                format_category_chart("Income by Category", &series, &currency)
            } else {
                let series = analytics::category_series(&snapshot.expenses, &snapshot.categories);
                format_category_chart("Expenses by Category", &series, &currency)
            };
            print!("{}", output);
        }

        AnalyticsCommands::Months => {
            load(state, &[Collection::Expenses]).await?;
            let mut series = analytics::monthly_series(&state.snapshot().expenses);
            series.labels = series
                .labels
                .iter()
                .map(|key| analytics::month_label(key))
                .collect();
            print!("{}", format_category_chart("Expenses by Month", &series, &currency));
        }

        AnalyticsCommands::Trend => {
            load(state, &[Collection::Expenses, Collection::Incomes]).await?;
            let snapshot = state.snapshot();
            let trend = services::combined_trend(&snapshot.incomes, &snapshot.expenses);
            print!("{}", format_trend(&trend, &currency));
        }

        AnalyticsCommands::Export {
            format,
            output,
            trend,
        } => {
            load(state, &RECORD_COLLECTIONS).await?;
            let export = AnalyticsExport::build(state.snapshot(), state.monthly_budget());

            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    write_export(&export, format, trend, &mut writer)?;
                    writer.flush()?;
                    println!("Exported {} to {}", format.extension(), path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = stdout.lock();
                    write_export(&export, format, trend, &mut writer)?;
                }
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    export: &AnalyticsExport,
    format: ExportFormat,
    trend: bool,
    writer: &mut W,
) -> FinboardResult<()> {
    match format {
        ExportFormat::Json => export_analytics_json(export, writer),
        ExportFormat::Yaml => export_analytics_yaml(export, writer),
        ExportFormat::Csv if trend => export_trend_csv(writer, &export.trend),
        ExportFormat::Csv => export_categories_csv(
            writer,
            &export.expenses_by_category,
            &export.income_by_category,
        ),
    }
}

pub async fn handle_overview_command<A: FinanceApi>(
    state: &mut AppState<A>,
    cmd: OverviewCommands,
) -> FinboardResult<()> {
    let currency = state.settings().currency_symbol.clone();
    let today = services::period::today();

    match cmd {
        OverviewCommands::Month { period } => {
            let period = services::parse_or_current(period.as_deref(), today)?;
            load(state, &[Collection::Expenses, Collection::Incomes]).await?;
            let snapshot = state.snapshot();
            let overview =
                services::monthly_overview(&snapshot.incomes, &snapshot.expenses, period);
            print!("{}", format_monthly_overview(&overview, &currency));
        }

        OverviewCommands::Day { date } => {
            load(state, &[Collection::Expenses, Collection::Incomes]).await?;
            let snapshot = state.snapshot();
            let summary = services::daily_summary(
                &snapshot.incomes,
                &snapshot.expenses,
                date.unwrap_or(today),
            );
            print!("{}", format_daily_summary(&summary, &currency));
        }

        OverviewCommands::Calendar { period } => {
            let period = services::parse_or_current(period.as_deref(), today)?;
            load(state, &[Collection::Expenses, Collection::Incomes]).await?;
            let snapshot = state.snapshot();
            let days = services::calendar(&snapshot.incomes, &snapshot.expenses, period);
            println!("{}", period.label());
            print!("{}", format_calendar(&days, &currency));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AllocationPercentages, Category, CategoryId, Expense, ExpenseId, Money, RecordDate,
    };
    use crate::state::Snapshot;

    fn sample_export() -> AnalyticsExport {
        let snapshot = Snapshot {
            categories: vec![Category::new(1, "Rent")],
            expenses: vec![Expense {
                id: ExpenseId::new(1),
                amount: Money::new(900.0),
                description: "March rent".into(),
                category_id: Some(CategoryId::new(1)),
                notes: None,
                expense_date: RecordDate::new("2024-03-01"),
            }],
            ..Default::default()
        };
        let budget = services::compute_monthly_budget(
            &snapshot.incomes,
            &snapshot.expenses,
            &snapshot.categories,
            &AllocationPercentages::default(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        );
        AnalyticsExport::build(&snapshot, &budget)
    }

    #[test]
    fn test_write_export_picks_csv_table() {
        let export = sample_export();

        let mut categories = Vec::new();
        write_export(&export, ExportFormat::Csv, false, &mut categories).unwrap();
        assert!(String::from_utf8(categories).unwrap().contains("expense,Rent,900.00"));

        let mut trend = Vec::new();
        write_export(&export, ExportFormat::Csv, true, &mut trend).unwrap();
        assert!(String::from_utf8(trend).unwrap().contains("2024-03,0.00,900.00,-900.00"));
    }

    #[test]
    fn test_write_export_json() {
        let mut buffer = Vec::new();
        write_export(&sample_export(), ExportFormat::Json, false, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["expenses_by_category"]["Rent"], 900.0);
    }
}
