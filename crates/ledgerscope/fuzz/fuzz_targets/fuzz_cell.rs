//! Fuzz target for cell parsing and leading-digit extraction.

#![no_main]

use ledgerscope::benford::leading_digit;
use ledgerscope::input::parse_cell;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(raw) = std::str::from_utf8(data) {
        if let Some(v) = parse_cell(raw).as_f64() {
            if let Some(d) = leading_digit(v) {
                assert!((1..=9).contains(&d));
            }
        }
    }
});
