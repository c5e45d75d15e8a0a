//! Encoding detection and decoding of raw file bytes.

mod loader;
mod sniffer;

pub use loader::{decode, decode_bytes, RawFile};
pub use sniffer::{classify, EncodingLabel, SCAN_LIMIT, SNIFF_PREFIX_LEN};
