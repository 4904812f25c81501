//! Rendering utilities for human-facing surfaces (Markdown, terminal).

#![forbid(unsafe_code)]

mod markdown;
mod text;

pub use markdown::render_markdown;
pub use text::render_text_summary;

#[cfg(test)]
pub(crate) mod fixtures {
    use iacguard_types::{
        CheckCategory, IacguardData, IacguardReport, OverallVerdict, SCHEMA_REPORT_V1, ToolMeta,
        Verdict, VerdictCounts, VerdictRecord,
    };
    use time::macros::datetime;

    pub fn record(ty: &str, name: &str, check: &str, verdict: Verdict) -> VerdictRecord {
        VerdictRecord {
            check_id: check.to_string(),
            check_name: format!("{check} name"),
            resource_type: ty.to_string(),
            resource_identifier: name.to_string(),
            verdict,
            category: CheckCategory::Networking,
            note: None,
        }
    }

    pub fn report(records: Vec<VerdictRecord>) -> IacguardReport {
        let mut counts = VerdictCounts::default();
        for r in &records {
            counts.record(r.verdict);
        }
        IacguardReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "iacguard".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: datetime!(2026-01-01 00:00 UTC),
            finished_at: datetime!(2026-01-01 00:00:01 UTC),
            verdict: if counts.failed == 0 {
                OverallVerdict::Pass
            } else {
                OverallVerdict::Fail
            },
            records,
            data: IacguardData {
                profile: "strict".to_string(),
                counts,
                ..IacguardData::default()
            },
        }
    }
}
