//! The `list-checks` use case.

use anyhow::Context;
use iacguard_domain::checks::builtin;
use iacguard_settings::{IacguardConfigV1, Overrides};
use iacguard_types::CheckCategory;

/// One built-in check as seen through the resolved settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub id: String,
    pub name: String,
    pub categories: Vec<CheckCategory>,
    pub resource_types: Vec<String>,
    pub enabled: bool,
}

/// Every built-in check compiled in, flagged with whether `config_text` enables it.
pub fn list_checks(config_text: &str, overrides: Overrides) -> anyhow::Result<Vec<CheckSummary>> {
    let cfg = if config_text.trim().is_empty() {
        IacguardConfigV1::default()
    } else {
        iacguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    let resolved = iacguard_settings::resolve_config(cfg, overrides).context("resolve config")?;

    Ok(builtin()
        .iter()
        .map(|check| {
            let meta = check.meta();
            CheckSummary {
                id: meta.id.clone(),
                name: meta.name.clone(),
                categories: meta.categories.clone(),
                resource_types: meta.supported_resources.clone(),
                enabled: resolved.effective.is_enabled(&meta.id),
            }
        })
        .collect())
}
