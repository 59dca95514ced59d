use std::collections::HashMap;

use super::domain::{Report, ReportDraft, ReportId, ReportStatus, UNRANKED};
use super::risk::risk_score;
use crate::runtime::{Clock, Randomness};

/// Construct a new report from a draft without touching the collection.
///
/// The caller appends the result to the canonical collection and runs a
/// rank pass; until then the record carries the unranked sentinel. The id
/// is drawn from the randomness source and re-drawn until it is unique
/// against `existing`.
pub fn create_report(
    draft: ReportDraft,
    existing: &[Report],
    clock: &dyn Clock,
    rng: &dyn Randomness,
) -> Report {
    let ReportDraft {
        reporter,
        category,
        severity,
        location_query,
        location_text,
        image_name,
    } = draft;

    let severity = severity.min(100);
    let location_text = if location_text.is_empty() {
        location_query.clone()
    } else {
        location_text
    };

    Report {
        id: next_report_id(existing, rng),
        created_at: clock.now(),
        reporter,
        category,
        severity,
        risk_score: risk_score(severity as i64, category, rng),
        location_query,
        location_text,
        status: ReportStatus::Pending,
        priority_rank: UNRANKED,
        image_name,
        awarded: Default::default(),
    }
}

fn next_report_id(existing: &[Report], rng: &dyn Randomness) -> ReportId {
    loop {
        let bits = (rng.next_unit() * 4_294_967_296.0) as u32;
        let candidate = ReportId(format!("rpt-{bits:08x}"));
        if !existing.iter().any(|report| report.id == candidate) {
            return candidate;
        }
    }
}

/// Return a collection where the matching record carries `status`.
///
/// An unknown id is a silent no-op: the collection comes back unchanged,
/// matching the permissive semantics the reporting surface relies on. No
/// other record is ever touched.
pub fn set_status(reports: Vec<Report>, id: &ReportId, status: ReportStatus) -> Vec<Report> {
    reports
        .into_iter()
        .map(|mut report| {
            if &report.id == id {
                report.status = status;
            }
            report
        })
        .collect()
}

/// Reassign dense 1..N priority ranks over the active subset.
///
/// Active reports are ordered by risk score descending, more recent
/// `created_at` first on ties; the stable sort keeps full ties
/// deterministic. Resolved and Flagged records fall out of the numbering
/// entirely and carry the unranked sentinel.
pub fn recompute_ranks(reports: Vec<Report>) -> Vec<Report> {
    let mut active: Vec<(ReportId, u8, chrono::DateTime<chrono::Utc>)> = reports
        .iter()
        .filter(|report| report.is_active())
        .map(|report| (report.id.clone(), report.risk_score, report.created_at))
        .collect();

    active.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

    let ranks: HashMap<ReportId, u32> = active
        .into_iter()
        .enumerate()
        .map(|(index, (id, _, _))| (id, index as u32 + 1))
        .collect();

    reports
        .into_iter()
        .map(|mut report| {
            report.priority_rank = ranks.get(&report.id).copied().unwrap_or(UNRANKED);
            report
        })
        .collect()
}
