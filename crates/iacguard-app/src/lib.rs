//! Use case orchestration for iacguard.
//!
//! This crate provides the application layer: use cases that coordinate settings, the domain
//! engine and the report envelope. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod catalog;
mod check;
mod explain;
mod input;
mod report;

pub use catalog::{CheckSummary, list_checks};
pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use input::parse_configuration_json;
pub use report::{
    config_schema_json, parse_report_json, report_schema_json, runtime_error_report,
    serialize_report,
};
