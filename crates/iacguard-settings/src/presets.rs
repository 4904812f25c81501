use iacguard_domain::checks::compiled_check_ids;
use iacguard_domain::policy::{CheckPolicy, EffectiveConfig};
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "strict";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "strict" => Some(strict_profile()),
        "none" => Some(none_profile()),
        _ => None,
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        parallel: false,
        checks: default_checks(CheckPolicy::enabled),
    }
}

/// Everything off; repo config opts checks in one by one.
fn none_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "none".to_string(),
        parallel: false,
        checks: default_checks(CheckPolicy::disabled),
    }
}

/// Presets only cover the checks compiled into this build.
fn default_checks(policy: fn() -> CheckPolicy) -> BTreeMap<String, CheckPolicy> {
    compiled_check_ids()
        .into_iter()
        .map(|id| (id.to_string(), policy()))
        .collect()
}
