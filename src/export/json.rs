//! JSON export of analytics
//!
//! The same [`AnalyticsExport`] document backs the YAML export.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FinboardError, FinboardResult};
use crate::models::MonthlyBudget;
use crate::services::{aggregate_by_category, combined_trend, TrendSeries};
use crate::state::Snapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything the analytics view shows, as one document
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,

    /// All-time expense totals per category name
    pub expenses_by_category: BTreeMap<String, f64>,

    /// All-time income totals per income category name
    pub income_by_category: BTreeMap<String, f64>,

    /// Income and expenses per month
    pub trend: TrendSeries,

    /// Bucket allocation for the reference month
    pub monthly_budget: MonthlyBudget,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub income_count: usize,
    pub first_month: Option<String>,
    pub last_month: Option<String>,
}

impl AnalyticsExport {
    pub fn build(snapshot: &Snapshot, monthly_budget: &MonthlyBudget) -> Self {
        let trend = combined_trend(&snapshot.incomes, &snapshot.expenses);
        let metadata = ExportMetadata {
            expense_count: snapshot.expenses.len(),
            income_count: snapshot.incomes.len(),
            first_month: trend.labels.first().cloned(),
            last_month: trend.labels.last().cloned(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses_by_category: aggregate_by_category(&snapshot.expenses, &snapshot.categories),
            income_by_category: aggregate_by_category(
                &snapshot.incomes,
                &snapshot.income_categories,
            ),
            trend,
            monthly_budget: monthly_budget.clone(),
            metadata,
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_analytics_json<W: Write>(
    export: &AnalyticsExport,
    writer: &mut W,
) -> FinboardResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| FinboardError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinboardError::Export(e.to_string()))?;
    Ok(())
}
