//! The check abstraction.
//!
//! A check is identity (id, name), applicability (supported resource types), category
//! tags and a pure predicate over one resource instance. Built-in checks live in
//! [`crate::checks`]; external code can implement [`Check`] or wrap a closure in
//! [`FnCheck`] and register it before the registry is frozen.

use crate::model::ResourceInstance;
use iacguard_types::{CheckCategory, Verdict};
use thiserror::Error;

/// Descriptor shared by every check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckMeta {
    pub id: String,
    pub name: String,
    /// Ordered, deduplicated. The first entry is the primary category.
    pub categories: Vec<CheckCategory>,
    pub supported_resources: Vec<String>,
}

impl CheckMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            categories: Vec::new(),
            supported_resources: Vec::new(),
        }
    }

    pub fn category(mut self, category: CheckCategory) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn supports(mut self, resource_type: impl Into<String>) -> Self {
        let resource_type = resource_type.into();
        if !self.supported_resources.contains(&resource_type) {
            self.supported_resources.push(resource_type);
        }
        self
    }

    pub fn applies_to(&self, resource_type: &str) -> bool {
        self.supported_resources.iter().any(|r| r == resource_type)
    }

    /// Category recorded on verdicts. Uncategorized checks report as `general_security`.
    pub fn primary_category(&self) -> CheckCategory {
        self.categories
            .first()
            .copied()
            .unwrap_or(CheckCategory::GeneralSecurity)
    }
}

/// A predicate could not reach a verdict.
///
/// The evaluator records the pair as FAILED with the fault as diagnostic note; a fault never
/// aborts a run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PredicateFault {
    #[error("attribute `{attribute}` has an unsupported shape: {detail}")]
    MalformedAttribute { attribute: String, detail: String },

    #[error("resource is malformed: {reason}")]
    MalformedResource { reason: String },

    #[error("check panicked: {message}")]
    Panicked { message: String },
}

pub trait Check: Send + Sync {
    fn meta(&self) -> &CheckMeta;

    /// Evaluate one resource. Only called for resources whose type the check supports.
    ///
    /// Implementations must be side-effect-free and fail-closed: a missing, ambiguous or
    /// default-looking value is `Verdict::Failed`, never `Passed`.
    fn evaluate(&self, resource: &ResourceInstance) -> Result<Verdict, PredicateFault>;

    fn id(&self) -> &str {
        &self.meta().id
    }
}

type Predicate = dyn Fn(&ResourceInstance) -> Result<Verdict, PredicateFault> + Send + Sync;

/// Closure-backed check, for rules supplied at registration time.
pub struct FnCheck {
    meta: CheckMeta,
    predicate: Box<Predicate>,
}

impl FnCheck {
    pub fn new<F>(meta: CheckMeta, predicate: F) -> Self
    where
        F: Fn(&ResourceInstance) -> Result<Verdict, PredicateFault> + Send + Sync + 'static,
    {
        Self {
            meta,
            predicate: Box::new(predicate),
        }
    }
}

impl std::fmt::Debug for FnCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCheck").field("meta", &self.meta).finish()
    }
}

impl Check for FnCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn evaluate(&self, resource: &ResourceInstance) -> Result<Verdict, PredicateFault> {
        (self.predicate)(resource)
    }
}
