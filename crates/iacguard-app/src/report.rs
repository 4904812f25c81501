use anyhow::Context;
use iacguard_settings::IacguardConfigV1;
use iacguard_types::{
    IacguardData, IacguardReport, OverallVerdict, ReportEnvelope, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

use crate::check::tool_meta;

pub fn parse_report_json(text: &str) -> anyhow::Result<IacguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse iacguard v1 report")
}

pub fn serialize_report(report: &IacguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Report written when a run could not start or finish: failing, no records, with the error.
pub fn runtime_error_report(message: &str) -> IacguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: OverallVerdict::Fail,
        records: Vec::new(),
        data: IacguardData {
            profile: "unknown".to_string(),
            runtime_error: Some(message.to_string()),
            ..IacguardData::default()
        },
    }
}

/// JSON schema of the emitted report envelope.
pub fn report_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(IacguardReport);
    serde_json::to_string_pretty(&schema).context("serialize report schema")
}

/// JSON schema of `iacguard.toml`.
pub fn config_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(IacguardConfigV1);
    serde_json::to_string_pretty(&schema).context("serialize config schema")
}
