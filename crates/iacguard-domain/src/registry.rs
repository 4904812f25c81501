use crate::check::Check;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Registration misuse. Fatal to startup: surfaced before any evaluation begins.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("check id `{0}` is already registered")]
    DuplicateId(String),

    #[error("check `{0}` declares no supported resource types")]
    EmptyApplicability(String),

    #[error("registry is frozen; cannot register check `{0}`")]
    Frozen(String),
}

/// The set of checks available to an evaluation run.
///
/// Constructed explicitly by the entry point, populated, then frozen and passed by
/// reference to the evaluator. Lookups return checks in registration order.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
    by_id: HashMap<String, usize>,
    frozen: bool,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: Check + 'static>(&mut self, check: C) -> Result<(), RegistryError> {
        self.register_boxed(Box::new(check))
    }

    /// Add a check. On error the registry is left untouched.
    pub fn register_boxed(&mut self, check: Box<dyn Check>) -> Result<(), RegistryError> {
        let id = check.id().to_string();
        if self.frozen {
            return Err(RegistryError::Frozen(id));
        }
        if check.meta().supported_resources.is_empty() {
            return Err(RegistryError::EmptyApplicability(id));
        }
        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }

        debug!(check_id = %id, resources = ?check.meta().supported_resources, "registered check");
        self.by_id.insert(id, self.checks.len());
        self.checks.push(check);
        Ok(())
    }

    /// Make the registry read-only. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Checks supporting `resource_type`, in registration order.
    pub fn checks_for(&self, resource_type: &str) -> Vec<&dyn Check> {
        self.checks
            .iter()
            .filter(|c| c.meta().applies_to(resource_type))
            .map(|c| c.as_ref())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Check> {
        self.by_id.get(id).map(|&idx| self.checks[idx].as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.ids())
            .field("frozen", &self.frozen)
            .finish()
    }
}
