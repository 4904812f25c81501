use crate::model::{Attributes, Configuration, ResourceInstance};
use crate::policy::{CheckPolicy, EffectiveConfig};
use serde_json::Value;
use std::collections::BTreeMap;

pub fn resource(resource_type: &str, name: &str, attrs: Value) -> ResourceInstance {
    let attributes: Attributes = match attrs {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("resource attributes must be a JSON object, got {other}"),
    };
    ResourceInstance::new(resource_type, name, attributes)
}

pub fn config(resources: Vec<ResourceInstance>) -> Configuration {
    resources.into_iter().collect()
}

pub fn config_with_checks(check_ids: &[&str]) -> EffectiveConfig {
    let checks: BTreeMap<String, CheckPolicy> = check_ids
        .iter()
        .map(|id| (id.to_string(), CheckPolicy::enabled()))
        .collect();
    EffectiveConfig {
        profile: "test".to_string(),
        parallel: false,
        checks,
    }
}

pub fn config_all_enabled() -> EffectiveConfig {
    config_with_checks(iacguard_types::explain::all_check_ids())
}
