//! Fuzz target for `iacguard.toml` parsing and resolution.
//!
//! Goal: arbitrary settings text must **never panic**. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_settings_toml
//! ```

#![no_main]

use iacguard_settings::{Overrides, parse_config_toml, resolve_config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(cfg) = parse_config_toml(text) {
        let _ = resolve_config(cfg, Overrides::default());
    }
});
