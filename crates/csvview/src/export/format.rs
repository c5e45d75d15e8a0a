//! Serializing tables to delimited text and JSON.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::Result;
use crate::input::Table;

/// Output format for exported tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type for downloads.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv; charset=utf-8",
            OutputFormat::Tsv => "text/tab-separated-values; charset=utf-8",
            OutputFormat::Json => "application/json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write a table in the given format.
pub fn write_table<W: Write>(table: &Table, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_delimited(table, b',', writer),
        OutputFormat::Tsv => write_delimited(table, b'\t', writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(writer, &table.rows)?;
            Ok(())
        }
    }
}

/// Write a header row followed by every data row.
pub fn write_delimited<W: Write>(table: &Table, delimiter: u8, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(&table.headers)?;
    for record in table.records() {
        writer.write_record(&record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render a table as delimited text.
pub fn to_delimited_string(table: &Table, delimiter: u8) -> Result<String> {
    let mut buffer = Vec::new();
    write_delimited(table, delimiter, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_records(
            vec!["name".to_string(), "note".to_string()],
            vec![vec!["Alice", "a, b"], vec!["Bob", ""]],
        )
    }

    #[test]
    fn test_write_csv_quotes_delimiters() {
        let text = to_delimited_string(&table(), b',').unwrap();
        assert_eq!(text, "name,note\nAlice,\"a, b\"\nBob,\n");
    }

    #[test]
    fn test_write_tsv() {
        let mut buffer = Vec::new();
        write_table(&table(), OutputFormat::Tsv, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "name\tnote\nAlice\ta, b\nBob\t\n");
    }

    #[test]
    fn test_write_json_preserves_column_order() {
        let mut buffer = Vec::new();
        write_table(&table(), OutputFormat::Json, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], "Alice");
        assert!(text.find("\"name\"").unwrap() < text.find("\"note\"").unwrap());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("TSV".parse::<OutputFormat>(), Ok(OutputFormat::Tsv));
        assert!("xlsx".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
