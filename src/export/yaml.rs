//! YAML export of analytics
//!
//! Same document as the JSON export, with a short comment header so the file
//! reads well on its own.

use std::io::Write;

use crate::error::{FinboardError, FinboardResult};
use crate::export::json::AnalyticsExport;

fn export_err(e: impl std::fmt::Display) -> FinboardError {
    FinboardError::Export(e.to_string())
}

pub fn export_analytics_yaml<W: Write>(
    export: &AnalyticsExport,
    writer: &mut W,
) -> FinboardResult<()> {
    writeln!(writer, "# Finboard Analytics Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(export_err)
}
