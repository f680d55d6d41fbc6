#![no_main]

use libfuzzer_sys::fuzz_target;
use sortviz_core::input::{ArrayLimits, parse_array};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 2048 {
        return;
    }

    // Parsing and validation must never panic.
    if let Ok(values) = parse_array(text) {
        if ArrayLimits::default().validate(&values).is_ok() {
            assert!((5..=15).contains(&values.len()));
            assert!(values.iter().all(|v| (10..=99).contains(v)));
        }
    }
});
