use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
}

impl CheckPolicy {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// Resolved settings the engine runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Dispatch per-resource evaluation on the rayon pool.
    pub parallel: bool,
    /// check_id -> policy. Checks without an entry are not registered.
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }

    pub fn is_enabled(&self, check_id: &str) -> bool {
        self.check_policy(check_id).is_some()
    }
}
