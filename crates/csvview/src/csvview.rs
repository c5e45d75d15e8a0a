//! Main CsvView struct and public API.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::encoding::{self, EncodingLabel, RawFile, SNIFF_PREFIX_LEN};
use crate::error::Result;
use crate::input::{delimiter_name, FileStats, Normalizer, NormalizerConfig, Table};

/// Configuration for loading files.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Normalizer configuration.
    pub normalizer: NormalizerConfig,
    /// Decode with this encoding instead of sniffing (None = sniff).
    pub encoding: Option<EncodingLabel>,
}

/// Result of loading a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResult {
    /// The cleaned table.
    pub table: Table,
    /// Summary statistics.
    pub stats: FileStats,
    /// Encoding the file was decoded with.
    pub encoding: EncodingLabel,
    /// Delimiter the file was parsed with.
    pub delimiter: char,
}

/// The load pipeline: sniff, decode, normalize.
///
/// Stateless: each call to [`CsvView::load`] reads the file and returns a
/// fresh table or an error.
pub struct CsvView {
    config: ViewerConfig,
    normalizer: Normalizer,
}

impl CsvView {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: ViewerConfig) -> Self {
        let normalizer = Normalizer::with_config(config.normalizer.clone());
        Self { config, normalizer }
    }

    /// Force a delimiter instead of guessing one.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.normalizer.delimiter = Some(delimiter);
        self.normalizer = Normalizer::with_config(self.config.normalizer.clone());
        self
    }

    /// Force an encoding instead of sniffing one.
    pub fn with_encoding(mut self, encoding: EncodingLabel) -> Self {
        self.config.encoding = Some(encoding);
        self
    }

    /// Classify the file's encoding from its leading bytes.
    pub fn detect_encoding(&self, file: &RawFile) -> Result<EncodingLabel> {
        if let Some(forced) = self.config.encoding {
            return Ok(forced);
        }
        let prefix = file.read_prefix(SNIFF_PREFIX_LEN)?;
        Ok(encoding::classify(&prefix))
    }

    /// Load a file: detect its encoding, decode it and normalize the table.
    pub fn load(&self, file: &RawFile) -> Result<LoadResult> {
        let label = self.detect_encoding(file)?;
        debug!(file = %file.name(), encoding = %label, "detected encoding");

        let text = encoding::decode(file, label)?;
        let normalized = self.normalizer.normalize(&text)?;

        let stats = FileStats::new(
            file.name(),
            file.size_bytes(),
            label,
            normalized.delimiter,
            &normalized.table,
        );

        info!(
            file = %file.name(),
            rows = stats.total_rows,
            columns = stats.column_count(),
            encoding = %label,
            delimiter = %delimiter_name(normalized.delimiter),
            "loaded file"
        );

        Ok(LoadResult {
            table: normalized.table,
            stats,
            encoding: label,
            delimiter: normalized.delimiter as char,
        })
    }
}

impl Default for CsvView {
    fn default() -> Self {
        Self::new()
    }
}
