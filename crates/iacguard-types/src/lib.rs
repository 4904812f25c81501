//! Stable DTOs and IDs used across the iacguard workspace.
//!
//! This crate is intentionally boring:
//! - verdicts, categories and verdict records shared by the engine and its consumers
//! - the emitted report envelope
//! - stable string IDs for the built-in checks
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    CategoryCounts, CheckCategory, IacguardData, IacguardReport, OverallVerdict, ReportEnvelope,
    SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts, VerdictRecord,
};
