use chrono::{DateTime, Utc};
use serde::Serialize;

use super::detector::DetectionOutcome;
use super::domain::{AwardedStages, CitizenId, Report, ReportId, UNRANKED};
use super::ledger::CitizenLedger;

/// Full serialized projection of one report for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub id: ReportId,
    pub created_at: DateTime<Utc>,
    pub reporter: CitizenId,
    pub category: &'static str,
    pub severity: u8,
    pub severity_band: &'static str,
    pub risk_score: u8,
    pub location_query: String,
    pub location_text: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_rank: Option<u32>,
    pub image_name: String,
    pub awarded: AwardedStages,
}

/// One row of the ranked triage queue.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntryView {
    pub priority_rank: u32,
    pub id: ReportId,
    pub category: &'static str,
    pub risk_score: u8,
    pub severity_band: &'static str,
    pub location_text: String,
    pub reported_at: DateTime<Utc>,
}

impl Report {
    pub fn to_view(&self) -> ReportView {
        ReportView {
            id: self.id.clone(),
            created_at: self.created_at,
            reporter: self.reporter.clone(),
            category: self.category.label(),
            severity: self.severity,
            severity_band: self.severity_band().label(),
            risk_score: self.risk_score,
            location_query: self.location_query.clone(),
            location_text: self.location_text.clone(),
            status: self.status.label(),
            priority_rank: (self.priority_rank != UNRANKED).then_some(self.priority_rank),
            image_name: self.image_name.clone(),
            awarded: self.awarded,
        }
    }

    pub fn to_queue_entry(&self) -> QueueEntryView {
        QueueEntryView {
            priority_rank: self.priority_rank,
            id: self.id.clone(),
            category: self.category.label(),
            risk_score: self.risk_score,
            severity_band: self.severity_band().label(),
            location_text: self.location_text.clone(),
            reported_at: self.created_at,
        }
    }
}

/// Reward totals for one citizen, as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerView {
    pub citizen: CitizenId,
    pub total: u32,
    pub breakdown: BreakdownView,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownView {
    pub reported: u32,
    pub verified: u32,
    pub resolved: u32,
}

impl LedgerView {
    pub fn from_ledger(citizen: CitizenId, ledger: CitizenLedger) -> Self {
        Self {
            citizen,
            total: ledger.total,
            breakdown: BreakdownView {
                reported: ledger.breakdown.reported,
                verified: ledger.breakdown.verified,
                resolved: ledger.breakdown.resolved,
            },
        }
    }
}

/// Mock detection response payload.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionView {
    pub image_name: String,
    pub category: &'static str,
    pub severity: u8,
    pub severity_band: &'static str,
    pub confidence_pct: u8,
}

impl DetectionOutcome {
    pub fn to_view(&self) -> DetectionView {
        DetectionView {
            image_name: self.image_name.clone(),
            category: self.category.label(),
            severity: self.severity,
            severity_band: self.severity_band().label(),
            confidence_pct: self.confidence_pct,
        }
    }
}
