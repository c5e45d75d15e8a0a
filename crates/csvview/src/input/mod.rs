//! CSV normalization and the tabular data model.

mod acceptance;
mod normalizer;
mod stats;
mod table;

pub use acceptance::{accept_file, CSV_MIME_TYPE};
pub use normalizer::{
    clean_cell, clean_header, delimiter_name, guess_delimiter, normalize, parse_delimiter,
    validate_delimiter, Normalized, Normalizer, NormalizerConfig, DELIMITER_CANDIDATES,
};
pub use stats::{format_file_size, FileStats};
pub use table::{Row, Table};
