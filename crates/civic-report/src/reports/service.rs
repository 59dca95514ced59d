use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::detector::{assess_image, DetectionOutcome};
use super::domain::{CitizenId, Report, ReportDraft, ReportId, ReportStatus, RewardStage};
use super::ledger::{award, totals_for};
use super::repository::{sanitize, ReportStorage, SessionStorage, StorageError};
use super::store::{create_report, recompute_ranks, set_status};
use super::views::{LedgerView, QueueEntryView, ReportView};
use crate::runtime::{Clock, Randomness, SystemClock, ThreadRandomness};
use crate::session::SessionRecord;

/// Service composing the pure report/ledger core with the storage
/// collaborators. Every method is one load -> transform -> save sequence
/// over an immutable snapshot of the collection.
pub struct ReportDeskService<S, N> {
    reports: Arc<S>,
    sessions: Arc<N>,
    clock: Arc<dyn Clock>,
    rng: Arc<dyn Randomness>,
}

/// Outcome of a submission: the stored record plus the sign-up reward.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub report: ReportView,
    pub points_granted: u32,
}

/// Outcome of a status transition or direct award attempt.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    pub updated: bool,
    pub points_granted: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportView>,
}

impl<S, N> ReportDeskService<S, N>
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    pub fn new(reports: Arc<S>, sessions: Arc<N>) -> Self {
        Self::with_sources(
            reports,
            sessions,
            Arc::new(SystemClock),
            Arc::new(ThreadRandomness),
        )
    }

    pub fn with_sources(
        reports: Arc<S>,
        sessions: Arc<N>,
        clock: Arc<dyn Clock>,
        rng: Arc<dyn Randomness>,
    ) -> Self {
        Self {
            reports,
            sessions,
            clock,
            rng,
        }
    }

    /// Accept a new report: append, award the reported stage, re-rank.
    pub fn submit(&self, draft: ReportDraft) -> Result<SubmissionReceipt, ReportDeskError> {
        let mut collection = self.load_reports()?;
        let report = create_report(draft, &collection, self.clock.as_ref(), self.rng.as_ref());
        let id = report.id.clone();
        collection.push(report);

        let (collection, granted) = award(collection, &id, RewardStage::Reported);
        let collection = recompute_ranks(collection);
        self.reports.save(&collection)?;

        let stored = collection
            .iter()
            .find(|report| report.id == id)
            .ok_or_else(|| StorageError::Unavailable("stored report missing after save".into()))?;

        info!(id = %stored.id.0, risk = stored.risk_score, "report accepted");

        Ok(SubmissionReceipt {
            report: stored.to_view(),
            points_granted: granted,
        })
    }

    /// Apply a status change and attempt the stage it unlocks.
    ///
    /// Unknown ids are the permissive no-op from the core: nothing changes,
    /// nothing is granted, and `updated` comes back false.
    pub fn transition(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> Result<TransitionOutcome, ReportDeskError> {
        let collection = self.load_reports()?;
        let known = collection.iter().any(|report| &report.id == id);

        let collection = set_status(collection, id, status);
        let (collection, granted) = match RewardStage::unlocked_by(status) {
            Some(stage) => award(collection, id, stage),
            None => (collection, 0),
        };
        let collection = recompute_ranks(collection);
        self.reports.save(&collection)?;

        if known {
            info!(id = %id.0, status = status.label(), granted, "report transitioned");
        }

        Ok(TransitionOutcome {
            updated: known,
            points_granted: granted,
            report: collection
                .iter()
                .find(|report| &report.id == id)
                .map(Report::to_view),
        })
    }

    /// Direct award attempt for an arbitrary stage.
    ///
    /// Stage/status coupling is caller-enforced by design; only the flagged
    /// gate and the one-time flags apply here.
    pub fn award_stage(
        &self,
        id: &ReportId,
        stage: RewardStage,
    ) -> Result<TransitionOutcome, ReportDeskError> {
        let collection = self.load_reports()?;
        let known = collection.iter().any(|report| &report.id == id);

        let (collection, granted) = award(collection, id, stage);
        if granted > 0 {
            self.reports.save(&collection)?;
        }

        Ok(TransitionOutcome {
            updated: known && granted > 0,
            points_granted: granted,
            report: collection
                .iter()
                .find(|report| &report.id == id)
                .map(Report::to_view),
        })
    }

    /// Ranked queue of active reports for the triage surface.
    pub fn triage_queue(&self) -> Result<Vec<QueueEntryView>, ReportDeskError> {
        let collection = recompute_ranks(self.load_reports()?);
        let mut active: Vec<&Report> = collection.iter().filter(|r| r.is_active()).collect();
        active.sort_by_key(|report| report.priority_rank);
        Ok(active.iter().map(|report| report.to_queue_entry()).collect())
    }

    /// Every report, newest first.
    pub fn reports(&self) -> Result<Vec<ReportView>, ReportDeskError> {
        let mut collection = self.load_reports()?;
        collection.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(collection.iter().map(Report::to_view).collect())
    }

    /// Reward totals for one citizen, recomputed from the collection.
    pub fn ledger(&self, citizen: &CitizenId) -> Result<LedgerView, ReportDeskError> {
        let collection = self.load_reports()?;
        let ledger = totals_for(citizen, &collection);
        Ok(LedgerView::from_ledger(citizen.clone(), ledger))
    }

    pub fn mock_detection(&self, image_name: &str) -> DetectionOutcome {
        assess_image(image_name, self.rng.as_ref())
    }

    pub fn sign_in(&self, session: SessionRecord) -> Result<(), ReportDeskError> {
        self.sessions.save(&session)?;
        Ok(())
    }

    pub fn session(&self) -> Result<Option<SessionRecord>, ReportDeskError> {
        Ok(self.sessions.load()?)
    }

    pub fn sign_out(&self) -> Result<(), ReportDeskError> {
        self.sessions.clear()?;
        Ok(())
    }

    fn load_reports(&self) -> Result<Vec<Report>, ReportDeskError> {
        Ok(sanitize(self.reports.load()?))
    }
}

/// Error raised by the report desk service.
#[derive(Debug, thiserror::Error)]
pub enum ReportDeskError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
