//! The `check` use case: evaluate a parsed configuration and produce a report.

use anyhow::Context;
use iacguard_domain::{CancelToken, EvalOptions};
use iacguard_settings::{IacguardConfigV1, Overrides, ResolvedConfig};
use iacguard_types::{
    IacguardData, IacguardReport, OverallVerdict, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta,
};
use time::OffsetDateTime;
use tracing::info;

use crate::input::parse_configuration_json;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Settings file contents (empty string if not found).
    pub config_text: &'a str,
    /// Parsed configuration as JSON, `{type: {name: {attr: value}}}`.
    pub input_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    pub cancel: Option<CancelToken>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: IacguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: resolve settings, build the registry, evaluate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Empty settings are allowed, defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        IacguardConfigV1::default()
    } else {
        iacguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        iacguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let registry = iacguard_domain::checks::builtin_registry(&resolved.effective)
        .context("build check registry")?;

    let configuration =
        parse_configuration_json(input.input_text).context("parse input configuration")?;

    info!(
        profile = %resolved.effective.profile,
        resource_types = configuration.type_count(),
        resources = configuration.resource_count(),
        checks = registry.len(),
        parallel = resolved.effective.parallel,
        "running checks"
    );

    let options = EvalOptions {
        parallel: resolved.effective.parallel,
        cancel: input.cancel.clone(),
    };
    let domain_report = iacguard_domain::evaluate(&configuration, &registry, options);

    // A cancelled run left resources unevaluated and cannot be reported green.
    let verdict = if domain_report.passed() && !domain_report.cancelled {
        OverallVerdict::Pass
    } else {
        OverallVerdict::Fail
    };

    let data = IacguardData {
        profile: resolved.effective.profile.clone(),
        resource_types_scanned: configuration.type_count() as u32,
        resources_scanned: configuration.resource_count() as u32,
        checks_registered: registry.len() as u32,
        counts: domain_report.counts,
        by_category: domain_report.by_category,
        cancelled: domain_report.cancelled,
        runtime_error: None,
    };

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        records: domain_report.records,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "iacguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: OverallVerdict) -> i32 {
    match verdict {
        OverallVerdict::Pass => 0,
        OverallVerdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iacguard_types::{Verdict, ids};

    const MIXED: &str = r#"{
        "aws_instance": {
            "web": {
                "iam_instance_profile": ["web-profile"],
                "subnet_id": ["subnet-private-abc"]
            },
            "bastion": {
                "subnet_id": ["subnet-public-1"]
            }
        },
        "aws_security_group": {
            "sg1": { "description": ["Managed by Terraform"] }
        },
        "aws_s3_bucket": {
            "logs": { "bucket": ["logs"] }
        }
    }"#;

    fn input<'a>(config_text: &'a str, input_text: &'a str) -> CheckInput<'a> {
        CheckInput {
            config_text,
            input_text,
            overrides: Overrides::default(),
            cancel: None,
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let output = run_check(input("", "{}")).expect("run_check");
        assert_eq!(output.resolved_config.effective.profile, "strict");
        assert_eq!(output.report.verdict, OverallVerdict::Pass);
        assert!(output.report.records.is_empty());
        assert_eq!(output.report.data.checks_registered, 3);
        assert_eq!(output.report.schema, SCHEMA_REPORT_V1);
        assert_eq!(output.report.tool.name, "iacguard");
    }

    #[test]
    fn mixed_configuration_fails_with_sorted_records() {
        let output = run_check(input("", MIXED)).expect("run_check");
        let report = &output.report;

        assert_eq!(report.verdict, OverallVerdict::Fail);
        assert_eq!(report.data.resource_types_scanned, 3);
        assert_eq!(report.data.resources_scanned, 4);
        assert_eq!(report.data.counts.passed, 2);
        assert_eq!(report.data.counts.failed, 3);

        let keys: Vec<(String, &str, Verdict)> = report
            .records
            .iter()
            .map(|r| (r.resource_address(), r.check_id.as_str(), r.verdict))
            .collect();
        assert_eq!(
            keys,
            vec![
                (
                    "aws_instance.bastion".to_string(),
                    ids::CHECK_AWS_EC2_INSTANCE_PROFILE,
                    Verdict::Failed
                ),
                (
                    "aws_instance.bastion".to_string(),
                    ids::CHECK_AWS_EC2_PRIVATE_SUBNET,
                    Verdict::Failed
                ),
                (
                    "aws_instance.web".to_string(),
                    ids::CHECK_AWS_EC2_INSTANCE_PROFILE,
                    Verdict::Passed
                ),
                (
                    "aws_instance.web".to_string(),
                    ids::CHECK_AWS_EC2_PRIVATE_SUBNET,
                    Verdict::Passed
                ),
                (
                    "aws_security_group.sg1".to_string(),
                    ids::CHECK_AWS_SG_DESCRIPTION,
                    Verdict::Failed
                ),
            ]
        );
        assert!(report.started_at <= report.finished_at);
    }

    #[test]
    fn disabled_checks_are_not_registered() {
        let cfg = r#"
[checks.CUSTOM_AWS_1]
enabled = false
[checks.CUSTOM_AWS_2]
enabled = false
"#;
        let output = run_check(input(cfg, MIXED)).expect("run_check");
        assert_eq!(output.report.data.checks_registered, 1);
        assert_eq!(output.report.records.len(), 1);
        assert_eq!(output.report.records[0].check_id, ids::CHECK_AWS_SG_DESCRIPTION);
    }

    #[test]
    fn parallel_override_matches_sequential_records() {
        let sequential = run_check(input("", MIXED)).expect("sequential");
        let mut parallel_input = input("", MIXED);
        parallel_input.overrides.parallel = Some(true);
        let parallel = run_check(parallel_input).expect("parallel");

        assert!(parallel.resolved_config.effective.parallel);
        assert_eq!(sequential.report.records, parallel.report.records);
        assert_eq!(sequential.report.data.counts, parallel.report.data.counts);
    }

    #[test]
    fn cancelled_run_is_reported_as_failing() {
        let token = CancelToken::new();
        token.cancel();
        let mut cancelled = input("", MIXED);
        cancelled.cancel = Some(token);

        let output = run_check(cancelled).expect("run_check");
        assert!(output.report.data.cancelled);
        assert!(output.report.records.is_empty());
        assert_eq!(output.report.verdict, OverallVerdict::Fail);
    }

    #[test]
    fn invalid_input_json_is_an_error() {
        let err = run_check(input("", "{not json")).expect_err("should fail");
        assert!(format!("{err:#}").contains("parse input configuration"));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = run_check(input("profile = \"lenient\"", "{}")).expect_err("should fail");
        assert!(format!("{err:#}").contains("resolve config"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(OverallVerdict::Pass), 0);
        assert_eq!(verdict_exit_code(OverallVerdict::Fail), 2);
    }
}
