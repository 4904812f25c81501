//! Pure policy evaluation (no IO).
//!
//! Input: a configuration of resource instances constructed elsewhere, plus a frozen
//! check registry.
//! Output: one verdict record per (check, matching resource) pair, aggregated into a
//! deterministic report.

#![forbid(unsafe_code)]

pub mod attribute;
pub mod check;
pub mod model;
pub mod policy;
pub mod registry;
pub mod report;

mod engine;
pub mod checks;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod test_support;

pub use attribute::{Normalized, normalize, normalize_attr};
pub use check::{Check, CheckMeta, FnCheck, PredicateFault};
pub use engine::{CancelToken, EvalOptions, EvaluationRun, Evaluator, evaluate, run};
pub use model::{AttributeValue, Attributes, Configuration, ResourceInstance};
pub use registry::{CheckRegistry, RegistryError};
pub use report::{Report, aggregate};
