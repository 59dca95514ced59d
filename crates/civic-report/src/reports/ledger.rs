use serde::{Deserialize, Serialize};

use super::domain::{CitizenId, Report, ReportId, ReportStatus, RewardStage};

/// Pure eligibility predicate for a one-time stage reward.
///
/// Flagged is checked at award time, so a flagged report blocks every
/// stage regardless of what was awarded before.
pub fn can_award(report: &Report, stage: RewardStage) -> bool {
    if report.status == ReportStatus::Flagged {
        return false;
    }
    !report.awarded.stage(stage)
}

/// Grant a stage reward at most once, returning the points granted.
///
/// Unknown ids and ineligible stages leave the collection unchanged and
/// grant 0; calling twice in a row for the same `(id, stage)` grants 0 the
/// second time. Idempotent by construction.
pub fn award(reports: Vec<Report>, id: &ReportId, stage: RewardStage) -> (Vec<Report>, u32) {
    let mut granted = 0;
    let reports = reports
        .into_iter()
        .map(|mut report| {
            if &report.id == id && can_award(&report, stage) {
                report.awarded.mark(stage);
                granted = stage.reward();
            }
            report
        })
        .collect();
    (reports, granted)
}

/// Per-stage point totals for one citizen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub reported: u32,
    pub verified: u32,
    pub resolved: u32,
}

impl PointsBreakdown {
    fn add(&mut self, stage: RewardStage) {
        match stage {
            RewardStage::Reported => self.reported += stage.reward(),
            RewardStage::Verified => self.verified += stage.reward(),
            RewardStage::Resolved => self.resolved += stage.reward(),
        }
    }
}

/// Derived reward totals for one citizen. Never persisted; always
/// recomputed from the report collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenLedger {
    pub total: u32,
    pub breakdown: PointsBreakdown,
}

/// Aggregate awarded rewards across one citizen's reports.
///
/// Currently-flagged reports contribute zero even when stages were awarded
/// before the flag: history is preserved on the record but not counted.
pub fn totals_for(citizen: &CitizenId, reports: &[Report]) -> CitizenLedger {
    let mut breakdown = PointsBreakdown::default();

    for report in reports {
        if &report.reporter != citizen || report.status == ReportStatus::Flagged {
            continue;
        }
        for stage in RewardStage::ordered() {
            if report.awarded.stage(stage) {
                breakdown.add(stage);
            }
        }
    }

    CitizenLedger {
        total: breakdown.reported + breakdown.verified + breakdown.resolved,
        breakdown,
    }
}
