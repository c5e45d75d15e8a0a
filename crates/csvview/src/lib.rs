//! csvview: encoding-aware CSV loading and normalization.
//!
//! A file goes through three stages: its leading bytes are sniffed to pick
//! UTF-8 or a windows-1252 fallback, the whole file is decoded with that
//! encoding, and the text is parsed into a cleaned table.
//!
//! # Core Principles
//!
//! - **Best-effort guessing, exposed**: the chosen encoding and delimiter are
//!   part of every result
//! - **All or nothing**: a failed load never yields a partial table
//! - **Forgiving of real-world exports**: ragged rows, BOMs and blank lines
//!
//! # Example
//!
//! ```no_run
//! use csvview::{CsvView, RawFile};
//!
//! let file = RawFile::from_path("invoices.csv").unwrap();
//! let result = CsvView::new().load(&file).unwrap();
//!
//! println!("Rows: {}", result.stats.total_rows);
//! println!("Encoding: {}", result.encoding);
//! ```

pub mod encoding;
pub mod error;
pub mod export;
pub mod input;
pub mod session;

mod csvview;

pub use crate::csvview::{CsvView, LoadResult, ViewerConfig};
pub use encoding::{EncodingLabel, RawFile};
pub use error::{CsvViewError, Result};
pub use export::{export_file_name, OutputFormat, Report};
pub use input::{accept_file, FileStats, Normalizer, NormalizerConfig, Row, Table};
pub use session::{SubmissionGate, SubmissionPermit, ViewerSnapshot, ViewerState};
