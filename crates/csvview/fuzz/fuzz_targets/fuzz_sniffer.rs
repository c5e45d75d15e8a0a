//! Fuzz target for the encoding sniffer.
//!
//! Checks that classification never panics and that a valid UTF-8 prefix
//! is never sent to the Latin fallback.

#![no_main]

use csvview::encoding::{classify, EncodingLabel, SNIFF_PREFIX_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let prefix = &data[..data.len().min(SNIFF_PREFIX_LEN)];
    let label = classify(prefix);

    if std::str::from_utf8(prefix).is_ok() {
        assert_eq!(label, EncodingLabel::Utf8);
    }
});
