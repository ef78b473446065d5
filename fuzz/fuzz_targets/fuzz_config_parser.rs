//! Fuzz target for device configuration parsing.
//!
//! Goal: parsing, tree walks, and marker discovery should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Non-UTF-8 files are rejected before parsing.
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = stigaudit_conftree::fuzz::parse_and_walk(text);
    }
});
