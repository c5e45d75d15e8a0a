//! Advisory file-type check for submitted files.

use crate::error::{CsvViewError, Result};

/// MIME type browsers report for CSV files.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Accept a file when it is CSV-typed or named `*.csv`.
///
/// The MIME type is advisory: many platforms report `application/vnd.ms-excel`
/// or nothing at all for CSV exports, so a `.csv` name is sufficient.
pub fn accept_file(name: &str, mime_type: Option<&str>) -> Result<()> {
    let mime_ok = mime_type
        .map(|m| {
            m.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .eq_ignore_ascii_case(CSV_MIME_TYPE)
        })
        .unwrap_or(false);

    let name_ok = name.to_ascii_lowercase().ends_with(".csv");

    if mime_ok || name_ok {
        Ok(())
    } else {
        Err(CsvViewError::UnsupportedFile(format!(
            "'{}' is not a CSV file",
            name
        )))
    }
}
