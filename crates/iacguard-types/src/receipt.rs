use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for iacguard reports.
pub const SCHEMA_REPORT_V1: &str = "iacguard.report.v1";

/// Outcome of applying one check to one resource instance.
///
/// `Skipped` is reserved for checks that match the resource type but do not apply to the
/// resource's current state.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Passed,
    Failed,
    Skipped,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Passed => "PASSED",
            Verdict::Failed => "FAILED",
            Verdict::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category tag attached to a check.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Networking,
    Iam,
    Encryption,
    Logging,
    GeneralSecurity,
    BackupAndRecovery,
    Convention,
}

impl CheckCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckCategory::Networking => "networking",
            CheckCategory::Iam => "iam",
            CheckCategory::Encryption => "encryption",
            CheckCategory::Logging => "logging",
            CheckCategory::GeneralSecurity => "general_security",
            CheckCategory::BackupAndRecovery => "backup_and_recovery",
            CheckCategory::Convention => "convention",
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verdict for one (check, resource) pair. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictRecord {
    pub check_id: String,
    pub check_name: String,
    pub resource_type: String,
    /// Resource address within its type (`web` for `aws_instance.web`).
    pub resource_identifier: String,
    pub verdict: Verdict,
    /// Primary category of the check that produced this record.
    pub category: CheckCategory,

    /// Diagnostic attached when the verdict was forced by a predicate fault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl VerdictRecord {
    pub fn resource_address(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_identifier)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictCounts {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl VerdictCounts {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Failed => self.failed += 1,
            Verdict::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failed + self.skipped
    }
}

/// Verdict counts keyed by category tag (`networking`, `iam`, ...).
pub type CategoryCounts = BTreeMap<String, VerdictCounts>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverallVerdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Iacguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct IacguardData {
    pub profile: String,

    pub resource_types_scanned: u32,
    pub resources_scanned: u32,
    pub checks_registered: u32,

    pub counts: VerdictCounts,
    #[serde(default)]
    pub by_category: CategoryCounts,

    /// Set when the run stopped early; records cover only the resources reached.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,

    /// Set when the run could not start (bad input, bad settings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_error: Option<String>,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = IacguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: OverallVerdict,
    pub records: Vec<VerdictRecord>,
    pub data: TData,
}

pub type IacguardReport = ReportEnvelope<IacguardData>;
