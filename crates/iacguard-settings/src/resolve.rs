use crate::model::{IacguardConfigV1, SCHEMA_CONFIG_V1};
use crate::presets::{self, DEFAULT_PROFILE};
use crate::model::CheckConfig;
use iacguard_domain::policy::EffectiveConfig;
use iacguard_types::explain::all_check_ids;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub parallel: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: IacguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    let Some(mut effective) = presets::preset(&profile) else {
        anyhow::bail!("unknown profile: {profile} (expected 'strict' or 'none')");
    };

    if let Some(parallel) = overrides.parallel.or(cfg.parallel) {
        effective.parallel = parallel;
    }

    apply_check_overrides(&mut effective, &cfg.checks)?;

    Ok(ResolvedConfig { effective })
}

/// `effective.checks` holds exactly the compiled-in checks. A known check left out of the
/// build may be disabled (a no-op) but not enabled.
fn apply_check_overrides(
    effective: &mut EffectiveConfig,
    checks: &BTreeMap<String, CheckConfig>,
) -> anyhow::Result<()> {
    for (check_id, cc) in checks {
        if let Some(entry) = effective.checks.get_mut(check_id) {
            if let Some(enabled) = cc.enabled {
                entry.enabled = enabled;
            }
            continue;
        }
        if !all_check_ids().contains(&check_id.as_str()) {
            anyhow::bail!("unknown check id in config: {check_id}");
        }
        if cc.enabled != Some(false) {
            anyhow::bail!(
                "check {check_id} is not compiled into this build; enable its cargo feature or set enabled = false"
            );
        }
    }
    Ok(())
}
