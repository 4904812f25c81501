use crate::attribute::normalize_attr;
use crate::check::{Check, CheckMeta, PredicateFault};
use crate::model::ResourceInstance;
use iacguard_types::{CheckCategory, Verdict, ids};
use serde_json::Value;

/// Substring identifying a private placement. Case-sensitive.
pub const PRIVATE_SUBNET_MARKER: &str = "private";

/// EC2 instances must sit in a private subnet.
#[derive(Debug)]
pub struct Ec2PrivateSubnet {
    meta: CheckMeta,
}

impl Ec2PrivateSubnet {
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                ids::CHECK_AWS_EC2_PRIVATE_SUBNET,
                "Ensure EC2 instance is deployed in a private subnet",
            )
            .category(CheckCategory::Networking)
            .supports(ids::RESOURCE_AWS_INSTANCE),
        }
    }
}

impl Default for Ec2PrivateSubnet {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for Ec2PrivateSubnet {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn evaluate(&self, resource: &ResourceInstance) -> Result<Verdict, PredicateFault> {
        let subnet_id = normalize_attr(resource, "subnet_id");
        match subnet_id.as_scalar() {
            None => Ok(Verdict::Failed),
            // A structured value has no subnet id to read; its JSON text must not match.
            Some(Value::Object(_) | Value::Array(_)) => {
                Err(PredicateFault::MalformedAttribute {
                    attribute: "subnet_id".to_string(),
                    detail: "expected a subnet id string".to_string(),
                })
            }
            Some(_) if subnet_id.to_display_string().contains(PRIVATE_SUBNET_MARKER) => {
                Ok(Verdict::Passed)
            }
            Some(_) => Ok(Verdict::Failed),
        }
    }
}
