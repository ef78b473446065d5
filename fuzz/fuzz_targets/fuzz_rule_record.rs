//! Fuzz target for rule record decoding.
//!
//! Goal: the decoder should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_record
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = stigaudit_catalog::fuzz::parse_rule_record(text);
        let _ = stigaudit_catalog::fuzz::rule_id(text);
    }
});
