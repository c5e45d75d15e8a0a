//! Fuzz target for the full load pipeline on raw bytes.

#![no_main]

use csvview::{CsvView, RawFile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let file = RawFile::from_bytes("fuzz.csv", data.to_vec());
    let _ = CsvView::new().load(&file);
});
