//! Viewer state and the single in-flight submission guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::csvview::LoadResult;
use crate::error::{CsvViewError, Result};
use crate::input::{FileStats, Table};

/// What the presentation layer shows.
///
/// Transitions consume the old value and return a new one, so a state is
/// only ever replaced whole.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    loaded: Option<LoadResult>,
    error: Option<String>,
    loading: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A submission has started. Clears the previous error.
    pub fn begin_loading(self) -> Self {
        Self {
            loaded: self.loaded,
            error: None,
            loading: true,
        }
    }

    /// A submission finished successfully.
    pub fn loaded(self, result: LoadResult) -> Self {
        Self {
            loaded: Some(result),
            error: None,
            loading: false,
        }
    }

    /// A submission failed. The previously shown table stays.
    pub fn failed(self, message: impl Into<String>) -> Self {
        Self {
            loaded: self.loaded,
            error: Some(message.into()),
            loading: false,
        }
    }

    pub fn stats(&self) -> Option<&FileStats> {
        self.loaded.as_ref().map(|r| &r.stats)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the shown table is the built-in sample.
    pub fn is_sample(&self) -> bool {
        self.loaded.is_none()
    }

    /// The loaded table, or the sample table when nothing is loaded.
    pub fn display_table(&self) -> Table {
        match &self.loaded {
            Some(result) => result.table.clone(),
            None => Table::sample(),
        }
    }

    /// Serializable view of the state.
    pub fn snapshot(&self) -> ViewerSnapshot {
        let table = self.display_table();
        ViewerSnapshot {
            caption: match &self.loaded {
                Some(_) => format!("{} records loaded from your CSV file", table.row_count()),
                None => "Sample data - load a CSV file to see your data".to_string(),
            },
            summary: Summary::new(&table, self.stats()),
            table,
            stats: self.stats().cloned(),
            error: self.error.clone(),
            loading: self.loading,
            sample: self.is_sample(),
        }
    }
}

/// The four summary figures shown above the table.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub column_count: usize,
    pub file_size: String,
    pub encoding: String,
}

impl Summary {
    fn new(table: &Table, stats: Option<&FileStats>) -> Self {
        match stats {
            Some(stats) => Self {
                total_rows: stats.total_rows,
                column_count: stats.column_count(),
                file_size: stats.file_size.clone(),
                encoding: stats.encoding.to_string(),
            },
            None => Self {
                total_rows: table.row_count(),
                column_count: table.column_count(),
                file_size: "N/A".to_string(),
                encoding: "N/A".to_string(),
            },
        }
    }
}

/// Point-in-time copy of a [`ViewerState`] for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    pub table: Table,
    pub summary: Summary,
    pub caption: String,
    pub stats: Option<FileStats>,
    pub error: Option<String>,
    pub loading: bool,
    pub sample: bool,
}

/// Allows at most one submission through the pipeline at a time.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    busy: AtomicBool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or fail with [`CsvViewError::Busy`] if it is held.
    pub fn try_acquire(self: &Arc<Self>) -> Result<SubmissionPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CsvViewError::Busy)?;
        Ok(SubmissionPermit {
            gate: Arc::clone(self),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the gate on drop.
#[derive(Debug)]
pub struct SubmissionPermit {
    gate: Arc<SubmissionGate>,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
