use crate::check::{Check, CheckMeta, PredicateFault};
use crate::model::{AttributeValue, ResourceInstance};
use iacguard_types::{CheckCategory, Verdict, ids};
use serde_json::Value;

/// EC2 instances must have an IAM instance profile attached.
///
/// Presence only: the profile name itself is not inspected.
#[derive(Debug)]
pub struct Ec2InstanceProfile {
    meta: CheckMeta,
}

impl Ec2InstanceProfile {
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                ids::CHECK_AWS_EC2_INSTANCE_PROFILE,
                "Ensure EC2 instance has an IAM instance profile attached",
            )
            .category(CheckCategory::Iam)
            .supports(ids::RESOURCE_AWS_INSTANCE),
        }
    }
}

impl Default for Ec2InstanceProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for Ec2InstanceProfile {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn evaluate(&self, resource: &ResourceInstance) -> Result<Verdict, PredicateFault> {
        match resource.attribute("iam_instance_profile") {
            Some(value) if !is_empty_equivalent(value) => Ok(Verdict::Passed),
            _ => Ok(Verdict::Failed),
        }
    }
}

/// `null`, `""`, `false`, `0`, `{}`, and sequences holding only such values (`[]`, `[""]`).
fn is_empty_equivalent(value: &AttributeValue) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_empty_equivalent),
        Value::Object(map) => map.is_empty(),
    }
}
