use iacguard_types::{CategoryCounts, Verdict, VerdictCounts, VerdictRecord};
use std::cmp::Ordering;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Sorted by (resource_type, resource_identifier, check_id).
    pub records: Vec<VerdictRecord>,
    pub counts: VerdictCounts,
    pub by_category: CategoryCounts,
    pub cancelled: bool,
}

impl Report {
    /// True iff no record FAILED. An empty report passes.
    pub fn passed(&self) -> bool {
        !self.records.iter().any(|r| r.verdict == Verdict::Failed)
    }

    pub fn failed_records(&self) -> impl Iterator<Item = &VerdictRecord> {
        self.records.iter().filter(|r| r.verdict == Verdict::Failed)
    }
}

/// Collect verdict records into a deterministic report. The input is not modified.
pub fn aggregate(records: &[VerdictRecord]) -> Report {
    let mut sorted = records.to_vec();
    // Stable ordering regardless of dispatch/completion order.
    sorted.sort_by(compare_records);

    let mut counts = VerdictCounts::default();
    let mut by_category = CategoryCounts::new();
    for r in &sorted {
        counts.record(r.verdict);
        by_category
            .entry(r.category.as_str().to_string())
            .or_default()
            .record(r.verdict);
    }

    Report {
        records: sorted,
        counts,
        by_category,
        cancelled: false,
    }
}

fn compare_records(a: &VerdictRecord, b: &VerdictRecord) -> Ordering {
    // Ordering priority:
    // 1) resource_type
    // 2) resource_identifier
    // 3) check_id
    // 4) verdict, note (only differ for duplicate pairs fed in by hand)
    a.resource_type
        .cmp(&b.resource_type)
        .then_with(|| a.resource_identifier.cmp(&b.resource_identifier))
        .then_with(|| a.check_id.cmp(&b.check_id))
        .then_with(|| a.verdict.cmp(&b.verdict))
        .then_with(|| a.note.cmp(&b.note))
}
