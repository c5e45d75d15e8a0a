//! Byte sources and full-file decoding.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::warn;

use super::sniffer::EncodingLabel;
use crate::error::{CsvViewError, Result};

/// Where the bytes of a [`RawFile`] come from.
#[derive(Debug, Clone)]
enum ByteSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// An uploaded or on-disk file, read lazily by the pipeline.
#[derive(Debug, Clone)]
pub struct RawFile {
    name: String,
    size_bytes: u64,
    mime_type: Option<String>,
    source: ByteSource,
}

impl RawFile {
    /// Reference a file on disk. Only its metadata is read here.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metadata = std::fs::metadata(path).map_err(|e| CsvViewError::Read {
            name: path.display().to_string(),
            source: e,
        })?;

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type: None,
            source: ByteSource::Path(path.to_path_buf()),
        })
    }

    /// Wrap bytes already held in memory (e.g. an HTTP upload body).
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: None,
            source: ByteSource::Memory(bytes),
        }
    }

    /// Attach the MIME type reported by the client.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// File name without directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Read at most `limit` leading bytes.
    pub fn read_prefix(&self, limit: usize) -> Result<Vec<u8>> {
        match &self.source {
            ByteSource::Memory(bytes) => Ok(bytes[..bytes.len().min(limit)].to_vec()),
            ByteSource::Path(path) => {
                let file = self.open(path)?;
                let mut prefix = Vec::with_capacity(limit);
                file.take(limit as u64)
                    .read_to_end(&mut prefix)
                    .map_err(|e| self.read_error(e))?;
                Ok(prefix)
            }
        }
    }

    /// Read the whole file into memory.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        match &self.source {
            ByteSource::Memory(bytes) => Ok(bytes.clone()),
            ByteSource::Path(path) => {
                let mut file = self.open(path)?;
                let mut contents = Vec::with_capacity(self.size_bytes as usize);
                file.read_to_end(&mut contents)
                    .map_err(|e| self.read_error(e))?;
                Ok(contents)
            }
        }
    }

    fn open(&self, path: &Path) -> Result<File> {
        File::open(path).map_err(|e| self.read_error(e))
    }

    fn read_error(&self, source: std::io::Error) -> CsvViewError {
        CsvViewError::Read {
            name: self.name.clone(),
            source,
        }
    }
}

/// Read and decode the entire file with the given encoding.
pub fn decode(file: &RawFile, label: EncodingLabel) -> Result<String> {
    let bytes = file.read_all()?;
    Ok(decode_bytes(&bytes, label, file.name()))
}

/// Decode a byte buffer. Never fails: UTF-8 is decoded lossily and
/// windows-1252 maps every byte to a character.
pub fn decode_bytes(bytes: &[u8], label: EncodingLabel, name: &str) -> String {
    match label {
        EncodingLabel::Utf8 => {
            let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                warn!(file = %name, "invalid UTF-8 past the sniffed prefix; replaced with U+FFFD");
            }
            text.into_owned()
        }
        EncodingLabel::LatinFallback => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}
