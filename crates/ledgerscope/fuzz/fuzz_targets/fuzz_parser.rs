//! Fuzz target for the delimited-text parser.
//!
//! Parsing and analysing arbitrary bytes must never panic.

#![no_main]

use ledgerscope::{Analyzer, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    for delimiter in [b',', b'\t', b';'] {
        if let Ok(table) = parser.parse_bytes(data, delimiter) {
            let _ = Analyzer::new().analyze(&table);
        }
    }
});
