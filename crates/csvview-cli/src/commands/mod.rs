//! CLI command implementations.

pub mod export;
pub mod serve;
pub mod stats;
pub mod view;

use std::path::Path;

use csvview::{accept_file, CsvView, LoadResult, RawFile};
use tracing::debug;

use crate::cli::LoadArgs;

/// Check, open and load a file from disk.
pub(crate) fn load_file(
    file: &Path,
    load: &LoadArgs,
) -> Result<LoadResult, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let raw = RawFile::from_path(file)?;
    if !load.force {
        accept_file(raw.name(), None)?;
    }

    let config = load.to_config()?;
    debug!(?config, "loading {}", file.display());

    Ok(CsvView::with_config(config).load(&raw)?)
}
