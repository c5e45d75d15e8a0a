//! Fuzz target for the CSV normalizer.
//!
//! This fuzzer tests that the normalizer:
//! 1. Never panics on malformed input
//! 2. Only returns tables whose rows carry exactly the header keys

#![no_main]

use csvview::input::normalize;
use csvview::Table;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    // Only process reasonable-sized inputs to avoid OOM
    if text.len() > 100_000 {
        return;
    }

    if let Ok(result) = normalize(text) {
        assert!(!result.table.is_empty());
        for row in &result.table.rows {
            assert_eq!(row.len(), result.table.headers.len());
            assert!(!Table::is_blank_row(row));
        }
    }
});
