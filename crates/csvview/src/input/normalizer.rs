//! CSV parsing with delimiter guessing, header cleaning and blank-row removal.

use csv::StringRecord;
use indexmap::IndexSet;
use tracing::debug;

use super::table::{Row, Table};
use crate::error::{CsvViewError, Result};

/// Delimiters to try when guessing, in tie-break order.
pub const DELIMITER_CANDIDATES: &[u8] = &[b',', b'\t', b'|', b';'];

/// Marker character stripped from header names.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// A candidate must split sampled records into more than this many fields on average.
const MIN_AVERAGE_FIELDS: f64 = 1.99;

/// Normalizer configuration.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Delimiter to use (None = guess).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Records sampled per candidate when guessing the delimiter.
    pub sample_records: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            sample_records: 10,
        }
    }
}

/// A cleaned table together with the delimiter it was parsed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub table: Table,
    pub delimiter: u8,
}

/// Parses decoded text into a cleaned [`Table`].
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer with default configuration.
    pub fn new() -> Self {
        Self {
            config: NormalizerConfig::default(),
        }
    }

    /// Create a normalizer with custom configuration.
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Parse and clean `text`.
    ///
    /// The first record is the header row. Ragged rows are padded or
    /// truncated to the header width, and rows whose cells are all blank are
    /// dropped. No partial table is returned on failure.
    pub fn normalize(&self, text: &str) -> Result<Normalized> {
        let quote = self.config.quote;
        let delimiter = match self.config.delimiter {
            Some(d) => validate_delimiter(d, quote)?,
            None => guess_delimiter(text, quote, self.config.sample_records),
        };

        if let Some((line, message)) = find_quote_error(text, delimiter, quote) {
            return Err(CsvViewError::MalformedCsv {
                line,
                message: message.to_string(),
            });
        }

        let table = self.parse_text(text, delimiter)?;
        Ok(Normalized { table, delimiter })
    }

    fn parse_text(&self, text: &str, delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let raw_headers = reader.headers().map_err(malformed)?.clone();
        if raw_headers.is_empty() {
            return Err(CsvViewError::EmptySource("No columns found".to_string()));
        }
        let headers = clean_headers(&raw_headers);

        let mut parsed = 0usize;
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result.map_err(malformed)?;
            parsed += 1;

            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), record.get(i).map(clean_cell).unwrap_or_default()))
                .collect();

            if !Table::is_blank_row(&row) {
                rows.push(row);
            }
        }

        if parsed == 0 {
            return Err(CsvViewError::EmptySource("No data rows found".to_string()));
        }
        if rows.is_empty() {
            return Err(CsvViewError::EmptySource(format!(
                "All {} data rows are blank",
                parsed
            )));
        }

        debug!(
            parsed,
            kept = rows.len(),
            columns = headers.len(),
            "normalized table"
        );

        Ok(Table { headers, rows })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize `text` with the default configuration.
pub fn normalize(text: &str) -> Result<Normalized> {
    Normalizer::new().normalize(text)
}

/// Pick the candidate delimiter giving the most consistent field counts.
///
/// Candidates averaging fewer than two fields are skipped. Among the rest the
/// lowest total change in field count between consecutive records wins, with
/// ties going to the earlier candidate. Falls back to comma.
pub fn guess_delimiter(text: &str, quote: u8, sample_records: usize) -> u8 {
    let mut best: Option<(u8, usize)> = None;

    for &candidate in DELIMITER_CANDIDATES {
        let counts = sample_field_counts(text, candidate, quote, sample_records);
        if counts.is_empty() {
            continue;
        }

        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average <= MIN_AVERAGE_FIELDS {
            continue;
        }

        let delta: usize = counts.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((candidate, delta)),
        }
    }

    let delimiter = best.map(|(d, _)| d).unwrap_or(b',');
    debug!(delimiter = %delimiter_name(delimiter), guessed = best.is_some(), "resolved delimiter");
    delimiter
}

fn sample_field_counts(text: &str, delimiter: u8, quote: u8, limit: usize) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .records()
        .filter_map(|r| r.ok())
        .filter(|r| r.iter().any(|f| !f.trim().is_empty()))
        .take(limit)
        .map(|r| r.len())
        .collect()
}

/// First quoting error, with the line it occurs on.
///
/// Follows the reader's quoting rules: a quote only opens a field at its
/// start, and a doubled quote inside a quoted field is an escape. A closing
/// quote may be followed by spaces, then must end the field. `\n`, `\r\n`
/// and a lone `\r` each end a line.
fn find_quote_error(text: &str, delimiter: u8, quote: u8) -> Option<(u64, &'static str)> {
    let bytes = text.as_bytes();
    let mut line = 1u64;
    let mut at_field_start = true;
    let mut open_since: Option<u64> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let line_break = b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n'));

        if open_since.is_some() {
            if b == quote {
                if bytes.get(i + 1) == Some(&quote) {
                    i += 2;
                    continue;
                }
                open_since = None;
                at_field_start = false;

                let mut j = i + 1;
                while j < bytes.len() && bytes[j] != delimiter && matches!(bytes[j], b' ' | b'\t') {
                    j += 1;
                }
                match bytes.get(j) {
                    None | Some(b'\n') | Some(b'\r') => {}
                    Some(&next) if next == delimiter => {}
                    Some(_) => return Some((line, "unexpected text after closing quote")),
                }
            } else if line_break {
                line += 1;
            }
            i += 1;
            continue;
        }

        if line_break {
            line += 1;
            at_field_start = true;
        } else if b == b'\r' || b == delimiter {
            at_field_start = true;
        } else if b == quote && at_field_start {
            open_since = Some(line);
        } else {
            at_field_start = false;
        }
        i += 1;
    }

    open_since.map(|line| (line, "unterminated quoted field"))
}

fn malformed(err: csv::Error) -> CsvViewError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    CsvViewError::MalformedCsv {
        line,
        message: err.to_string(),
    }
}

fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == BYTE_ORDER_MARK
}

/// Trim a header name and remove every embedded byte-order mark.
pub fn clean_header(raw: &str) -> String {
    raw.trim_matches(is_trimmable).replace(BYTE_ORDER_MARK, "")
}

/// Trim surrounding whitespace from a cell value.
pub fn clean_cell(raw: &str) -> String {
    raw.trim_matches(is_trimmable).to_string()
}

/// Clean a header record, naming blank headers and suffixing duplicates.
fn clean_headers(raw: &StringRecord) -> Vec<String> {
    let mut headers: IndexSet<String> = IndexSet::with_capacity(raw.len());

    for (i, h) in raw.iter().enumerate() {
        let mut name = clean_header(h);
        if name.is_empty() {
            name = format!("column_{}", i + 1);
        }
        if headers.contains(&name) {
            let mut k = 1;
            while headers.contains(&format!("{}_{}", name, k)) {
                k += 1;
            }
            name = format!("{}_{}", name, k);
        }
        headers.insert(name);
    }

    headers.into_iter().collect()
}

/// Check that a delimiter can be used with the reader.
pub fn validate_delimiter(delimiter: u8, quote: u8) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == b'\n' || delimiter == b'\r' || delimiter == quote {
        return Err(CsvViewError::InvalidDelimiter(format!(
            "{:?} cannot be used as a delimiter",
            delimiter as char
        )));
    }
    Ok(delimiter)
}

/// Parse a user-supplied delimiter such as `,`, `\t`, `tab` or `semicolon`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    let delimiter = match s.to_lowercase().as_str() {
        "comma" => b',',
        "tab" | "\\t" | "\t" => b'\t',
        "pipe" => b'|',
        "semicolon" => b';',
        other if other.len() == 1 => other.as_bytes()[0],
        _ => {
            return Err(CsvViewError::InvalidDelimiter(format!(
                "{}: use a single ASCII character or comma, tab, pipe, semicolon",
                s
            )));
        }
    };
    validate_delimiter(delimiter, b'"')
}

/// Human-readable delimiter name.
pub fn delimiter_name(delimiter: u8) -> &'static str {
    match delimiter {
        b',' => "comma",
        b'\t' => "tab",
        b'|' => "pipe",
        b';' => "semicolon",
        _ => "custom",
    }
}
