//! Error types for the csvview library.

use thiserror::Error;

/// Main error type for csvview operations.
#[derive(Debug, Error)]
pub enum CsvViewError {
    /// The underlying byte source could not be read.
    #[error("IO error for '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader reported a structural error.
    #[error("Malformed CSV at line {line}: {message}")]
    MalformedCsv { line: u64, message: String },

    /// No header-defined columns or no usable data rows.
    #[error("Empty data: {0}")]
    EmptySource(String),

    /// The file is neither CSV-typed nor named `*.csv`.
    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    /// Another file is still being processed.
    #[error("A file is already being processed")]
    Busy,

    /// Invalid delimiter specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CsvViewError {
    /// The single message shown to the user when loading a file fails.
    pub fn user_message(&self) -> String {
        match self {
            CsvViewError::MalformedCsv { .. } => {
                "Error processing CSV file. Check the file format.".to_string()
            }
            CsvViewError::EmptySource(_) => {
                "CSV file is empty or contains no valid data.".to_string()
            }
            CsvViewError::UnsupportedFile(_) => "Please select a valid CSV file.".to_string(),
            CsvViewError::Busy => {
                "A file is already being processed. Please wait and try again.".to_string()
            }
            other => format!("Error processing CSV file: {}", other),
        }
    }
}

/// Result type alias for csvview operations.
pub type Result<T> = std::result::Result<T, CsvViewError>;
