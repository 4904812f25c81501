use iacguard_types::{IacguardReport, Verdict};

/// One line per record plus a summary line, for terminal output.
///
/// Format: `{VERDICT} {check_id} {resource_address}`
pub fn render_text_summary(report: &IacguardReport) -> String {
    let mut out = String::new();

    for r in &report.records {
        out.push_str(&format!(
            "{:<7} {} {}\n",
            r.verdict.as_str(),
            r.check_id,
            r.resource_address()
        ));
        if r.verdict == Verdict::Failed
            && let Some(note) = &r.note
        {
            out.push_str(&format!("        note: {}\n", note));
        }
    }

    let c = &report.data.counts;
    out.push_str(&format!(
        "\nPassed checks: {}, Failed checks: {}, Skipped checks: {}\n",
        c.passed, c.failed, c.skipped
    ));
    out
}
