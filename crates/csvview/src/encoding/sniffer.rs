//! Prefix-based UTF-8 / Latin fallback detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of leading bytes handed to the sniffer.
pub const SNIFF_PREFIX_LEN: usize = 2048;

/// Number of bytes whose lead position is validated.
pub const SCAN_LIMIT: usize = 1000;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Character encoding chosen for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingLabel {
    #[serde(rename = "UTF-8")]
    Utf8,
    /// Single-byte windows-1252 decoding; every byte maps to one character.
    #[serde(rename = "windows-1252")]
    LatinFallback,
}

impl EncodingLabel {
    /// Label as shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingLabel::Utf8 => "UTF-8",
            EncodingLabel::LatinFallback => "windows-1252",
        }
    }
}

impl fmt::Display for EncodingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(EncodingLabel::Utf8),
            "windows-1252" | "cp1252" | "latin1" | "latin-1" | "iso-8859-1" => {
                Ok(EncodingLabel::LatinFallback)
            }
            _ => Err(format!(
                "Unknown encoding: {}. Use utf-8 or windows-1252.",
                s
            )),
        }
    }
}

/// Classify a byte prefix as UTF-8 or Latin fallback.
///
/// A leading BOM wins immediately. Otherwise every high-bit byte that starts
/// within the first [`SCAN_LIMIT`] bytes must open a complete, well-formed
/// 2-, 3- or 4-byte sequence inside `prefix`. This is a heuristic: a clean
/// prefix says nothing about the rest of the file.
pub fn classify(prefix: &[u8]) -> EncodingLabel {
    if prefix.starts_with(&UTF8_BOM) {
        return EncodingLabel::Utf8;
    }

    let scan_end = prefix.len().min(SCAN_LIMIT);
    let mut i = 0;

    while i < scan_end {
        let byte = prefix[i];
        if byte <= 0x7F {
            i += 1;
            continue;
        }

        let continuation = match sequence_continuation_len(byte) {
            Some(n) => n,
            None => return EncodingLabel::LatinFallback,
        };

        // Continuation bytes may run past the scan window but not past the buffer.
        if i + continuation >= prefix.len() {
            return EncodingLabel::LatinFallback;
        }

        let well_formed = prefix[i + 1..=i + continuation]
            .iter()
            .all(|&b| is_continuation(b));
        if !well_formed {
            return EncodingLabel::LatinFallback;
        }

        i += continuation + 1;
    }

    EncodingLabel::Utf8
}

/// Number of continuation bytes a lead byte announces.
fn sequence_continuation_len(lead: u8) -> Option<usize> {
    if lead & 0xE0 == 0xC0 {
        Some(1)
    } else if lead & 0xF0 == 0xE0 {
        Some(2)
    } else if lead & 0xF8 == 0xF0 {
        Some(3)
    } else {
        None
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_is_utf8() {
        assert_eq!(classify(&[0xEF, 0xBB, 0xBF]), EncodingLabel::Utf8);
        // Garbage after the BOM is not inspected.
        assert_eq!(
            classify(&[0xEF, 0xBB, 0xBF, 0x80, 0xFF]),
            EncodingLabel::Utf8
        );
    }

    #[test]
    fn test_ascii_is_utf8() {
        assert_eq!(classify(b"name,age\nAlice,30\n"), EncodingLabel::Utf8);
        assert_eq!(classify(b""), EncodingLabel::Utf8);
    }

    #[test]
    fn test_multibyte_utf8() {
        assert_eq!(classify("Método,Preço\nCartão,€5\n".as_bytes()), EncodingLabel::Utf8);
        assert_eq!(classify("emoji 📊".as_bytes()), EncodingLabel::Utf8);
    }

    #[test]
    fn test_lone_continuation_byte() {
        assert_eq!(classify(&[b'a', 0x80, b'b']), EncodingLabel::LatinFallback);
    }

    #[test]
    fn test_latin1_accents() {
        // "Preço" in windows-1252: 0xE7 is a 3-byte lead followed by ASCII.
        assert_eq!(classify(b"Pre\xE7o,Valor\n"), EncodingLabel::LatinFallback);
    }

    #[test]
    fn test_truncated_sequence_at_end_of_buffer() {
        assert_eq!(classify(&[b'a', 0xC3]), EncodingLabel::LatinFallback);
        assert_eq!(classify(&[0xE2, 0x82]), EncodingLabel::LatinFallback);
    }

    #[test]
    fn test_invalid_lead_byte() {
        assert_eq!(classify(&[0xFF, 0x80]), EncodingLabel::LatinFallback);
        assert_eq!(classify(&[0xF8, 0x80, 0x80, 0x80]), EncodingLabel::LatinFallback);
    }

    #[test]
    fn test_bytes_past_scan_limit_ignored() {
        let mut bytes = vec![b'a'; SCAN_LIMIT];
        bytes.push(0x80);
        assert_eq!(classify(&bytes), EncodingLabel::Utf8);
    }

    #[test]
    fn test_sequence_straddling_scan_limit() {
        let mut bytes = vec![b'a'; SCAN_LIMIT - 1];
        bytes.extend_from_slice("é".as_bytes());
        assert_eq!(classify(&bytes), EncodingLabel::Utf8);

        let mut bad = vec![b'a'; SCAN_LIMIT - 1];
        bad.extend_from_slice(&[0xC3, b'x']);
        assert_eq!(classify(&bad), EncodingLabel::LatinFallback);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("UTF-8".parse::<EncodingLabel>(), Ok(EncodingLabel::Utf8));
        assert_eq!("latin1".parse::<EncodingLabel>(), Ok(EncodingLabel::LatinFallback));
        assert!("utf-16".parse::<EncodingLabel>().is_err());
        assert_eq!(EncodingLabel::LatinFallback.to_string(), "windows-1252");
    }
}
