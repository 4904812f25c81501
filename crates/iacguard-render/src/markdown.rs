use iacguard_types::{IacguardReport, OverallVerdict, Verdict};

pub fn render_markdown(report: &IacguardReport) -> String {
    let mut out = String::new();

    out.push_str("# Iacguard report\n\n");
    let verdict = match report.verdict {
        OverallVerdict::Pass => "PASS",
        OverallVerdict::Fail => "FAIL",
    };
    let c = &report.data.counts;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Checks: {} passed, {} failed, {} skipped\n\n",
        verdict, c.passed, c.failed, c.skipped
    ));

    if report.data.cancelled {
        out.push_str("> Note: evaluation was cancelled; results are partial.\n\n");
    }
    if let Some(err) = &report.data.runtime_error {
        out.push_str(&format!("> Error: {}\n\n", err));
    }

    if !report.data.by_category.is_empty() {
        out.push_str("| Category | Passed | Failed | Skipped |\n");
        out.push_str("|---|---|---|---|\n");
        for (category, counts) in &report.data.by_category {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                category, counts.passed, counts.failed, counts.skipped
            ));
        }
        out.push('\n');
    }

    let failed: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.verdict == Verdict::Failed)
        .collect();

    if failed.is_empty() {
        out.push_str("No failed checks.\n");
        return out;
    }

    out.push_str("## Failed checks\n\n");
    for r in failed {
        out.push_str(&format!(
            "- `{}` `{}`: {}\n",
            r.resource_address(),
            r.check_id,
            r.check_name
        ));
        if let Some(note) = &r.note {
            out.push_str(&format!("  - note: {}\n", note));
        }
    }

    out
}
