//! Report model handed to PDF and print renderers.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::input::{FileStats, Row, Table};

/// Suffix appended to the source file stem for exported reports.
pub const REPORT_SUFFIX: &str = "_report";

/// Prefix of the timestamped name used when no file has been loaded.
pub const DEFAULT_REPORT_PREFIX: &str = "csv_report";

/// Everything a renderer needs: title block, stats block and the data grid.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: TitleBlock,
    pub stats: StatsBlock,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleBlock {
    pub file_name: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsBlock {
    pub total_rows: usize,
    pub column_count: usize,
    pub file_size: Option<String>,
}

impl Report {
    /// Build a report for a table, with stats when it came from a file.
    pub fn new(table: &Table, stats: Option<&FileStats>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: TitleBlock {
                file_name: stats.map(|s| s.file_name.clone()),
                generated_at,
                encoding: stats.map(|s| s.encoding.to_string()),
            },
            stats: StatsBlock {
                total_rows: table.row_count(),
                column_count: table.column_count(),
                file_size: stats.map(|s| s.file_size.clone()),
            },
            headers: table.headers.clone(),
            rows: table.rows.clone(),
        }
    }
}

/// File name for an exported document.
///
/// `invoices.csv` becomes `invoices_report.pdf`; without a source file the
/// name is `csv_report_YYYYMMDD_HHMMSS.pdf`.
pub fn export_file_name(source: Option<&str>, extension: &str, now: DateTime<Utc>) -> String {
    let stem = source
        .map(|name| {
            Path::new(name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .filter(|stem| !stem.is_empty());

    match stem {
        Some(stem) => format!("{}{}.{}", stem, REPORT_SUFFIX, extension),
        None => format!(
            "{}_{}.{}",
            DEFAULT_REPORT_PREFIX,
            now.format("%Y%m%d_%H%M%S"),
            extension
        ),
    }
}
