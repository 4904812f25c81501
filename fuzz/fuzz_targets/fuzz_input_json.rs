//! Fuzz target for the configuration JSON input boundary.
//!
//! Goal: parsing arbitrary bytes and evaluating whatever parses must **never panic**, and
//! every (check, matching resource) pair must get exactly one record.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_input_json
//! ```

#![no_main]

use iacguard_domain::checks::builtin_registry;
use iacguard_domain::{EvalOptions, evaluate};
use iacguard_settings::{IacguardConfigV1, Overrides, resolve_config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(configuration) = iacguard_app::parse_configuration_json(text) else {
        return;
    };

    let resolved = resolve_config(IacguardConfigV1::default(), Overrides::default())
        .expect("default settings resolve");
    let registry = builtin_registry(&resolved.effective).expect("builtin registry");

    let report = evaluate(&configuration, &registry, EvalOptions::default());
    let expected: usize = configuration
        .resources()
        .map(|r| registry.checks_for(r.resource_type()).len())
        .sum();
    assert_eq!(report.records.len(), expected);
    assert_eq!(report.counts.total() as usize, expected);
});
