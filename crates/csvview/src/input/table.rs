//! Normalized tabular data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One data row: column name to cell text, in header order.
pub type Row = IndexMap<String, String>;

/// Parsed and cleaned tabular data.
///
/// Every row carries exactly the keys in `headers`, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Cleaned column headers.
    pub headers: Vec<String>,
    /// Data rows, header row excluded.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from headers and positional records.
    ///
    /// Short records are padded with empty strings and extra fields dropped.
    pub fn from_records<I, R, S>(headers: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Row> = records
            .into_iter()
            .map(|record| {
                let mut values = record.into_iter().map(|v| -> String { v.into() });
                headers
                    .iter()
                    .map(|h| (h.clone(), values.next().unwrap_or_default()))
                    .collect::<Row>()
            })
            .collect();

        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.as_str())
    }

    /// Iterate rows as positional records in header order.
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |row| {
            self.headers
                .iter()
                .map(|h| row.get(h).map(|s| s.as_str()).unwrap_or(""))
                .collect()
        })
    }

    /// Whether every value of a row is empty or whitespace-only.
    pub fn is_blank_row(row: &Row) -> bool {
        row.values().all(|v| v.trim().is_empty())
    }

    /// Placeholder data shown before any file has been loaded.
    pub fn sample() -> Self {
        let headers = ["Invoice", "Status", "Method", "Amount"]
            .into_iter()
            .map(String::from)
            .collect();

        Self::from_records(
            headers,
            [
                ["INV001", "Paid", "Credit Card", "$250.00"],
                ["INV002", "Pending", "PayPal", "$150.00"],
                ["INV003", "Unpaid", "Bank Transfer", "$350.00"],
                ["INV004", "Paid", "Credit Card", "$450.00"],
                ["INV005", "Paid", "PayPal", "$550.00"],
                ["INV006", "Pending", "Bank Transfer", "$200.00"],
                ["INV007", "Unpaid", "Credit Card", "$300.00"],
            ],
        )
    }
}
