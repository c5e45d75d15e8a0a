//! Exporting tables and building reports.

mod format;
mod report;

pub use format::{to_delimited_string, write_delimited, write_table, OutputFormat};
pub use report::{
    export_file_name, Report, StatsBlock, TitleBlock, DEFAULT_REPORT_PREFIX, REPORT_SUFFIX,
};
