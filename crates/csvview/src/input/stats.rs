//! Summary statistics for a loaded file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::table::Table;
use crate::encoding::EncodingLabel;

/// Summary of a successfully loaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStats {
    /// Number of data rows that survived cleaning.
    pub total_rows: usize,
    /// Cleaned column headers.
    pub columns: Vec<String>,
    /// File name without path.
    pub file_name: String,
    /// Human-readable size, e.g. `"1.50 KB"`.
    pub file_size: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Encoding the file was decoded with.
    pub encoding: EncodingLabel,
    /// Field delimiter used to parse the file.
    pub delimiter: char,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl FileStats {
    /// Derive stats from a normalized table.
    pub fn new(
        file_name: impl Into<String>,
        size_bytes: u64,
        encoding: EncodingLabel,
        delimiter: u8,
        table: &Table,
    ) -> Self {
        Self {
            total_rows: table.row_count(),
            columns: table.headers.clone(),
            file_name: file_name.into(),
            file_size: format_file_size(size_bytes),
            size_bytes,
            encoding,
            delimiter: delimiter as char,
            loaded_at: Utc::now(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Format a byte count in kilobytes with two decimals.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(100), "0.10 KB");
    }

    #[test]
    fn test_stats_from_table() {
        let table = Table::sample();
        let stats = FileStats::new("sample.csv", 2048, EncodingLabel::Utf8, b';', &table);

        assert_eq!(stats.total_rows, 7);
        assert_eq!(stats.column_count(), 4);
        assert_eq!(stats.file_size, "2.00 KB");
        assert_eq!(stats.delimiter, ';');

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["encoding"], "UTF-8");
    }
}
