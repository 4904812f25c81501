use crate::attribute::normalize_attr;
use crate::check::{Check, CheckMeta, PredicateFault};
use crate::model::ResourceInstance;
use iacguard_types::{CheckCategory, Verdict, ids};

/// Values the authoring tool injects when no description was written.
// TODO: move this list into settings; `iacguard.toml` has no per-check data section yet.
pub const PLACEHOLDER_DESCRIPTIONS: &[&str] = &["Managed by Terraform"];

/// Security groups must carry an authored description.
#[derive(Debug)]
pub struct SecurityGroupDescription {
    meta: CheckMeta,
}

impl SecurityGroupDescription {
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                ids::CHECK_AWS_SG_DESCRIPTION,
                "Ensure every security group has a description",
            )
            .category(CheckCategory::Networking)
            .supports(ids::RESOURCE_AWS_SECURITY_GROUP),
        }
    }
}

impl Default for SecurityGroupDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for SecurityGroupDescription {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn evaluate(&self, resource: &ResourceInstance) -> Result<Verdict, PredicateFault> {
        // Non-string scalars are not an authored description either.
        let Some(description) = normalize_attr(resource, "description").as_str() else {
            return Ok(Verdict::Failed);
        };
        let description = description.trim();
        if description.is_empty() || PLACEHOLDER_DESCRIPTIONS.contains(&description) {
            return Ok(Verdict::Failed);
        }
        Ok(Verdict::Passed)
    }
}
