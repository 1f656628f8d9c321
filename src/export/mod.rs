//! Export of analytics data
//!
//! - CSV: category totals and the monthly trend (spreadsheet-compatible)
//! - JSON: the full analytics document, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_categories_csv, export_trend_csv};
pub use json::{export_analytics_json, AnalyticsExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_analytics_yaml;

/// Output format for `analytics export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}
