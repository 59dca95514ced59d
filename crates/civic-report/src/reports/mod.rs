//! Report intake, triage ranking, and reward-points bookkeeping.
//!
//! The core operations (`store`, `ledger`, `risk`) are pure transformations
//! over an owned report collection; `service` threads them between the
//! storage collaborators and `router` exposes them to the presentation
//! layer.

pub mod detector;
pub mod domain;
pub mod ledger;
pub mod repository;
pub mod risk;
pub mod router;
pub mod service;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use detector::{assess_image, DetectionOutcome};
pub use domain::{
    AwardedStages, CitizenId, IssueCategory, Report, ReportDraft, ReportId, ReportStatus,
    RewardStage, SeverityBand, UNRANKED,
};
pub use ledger::{award, can_award, totals_for, CitizenLedger, PointsBreakdown};
pub use repository::{sanitize, ReportStorage, SessionStorage, StorageError};
pub use risk::risk_score;
pub use router::report_router;
pub use service::{ReportDeskError, ReportDeskService, SubmissionReceipt, TransitionOutcome};
pub use store::{create_report, recompute_ranks, set_status};
pub use views::{DetectionView, LedgerView, QueueEntryView, ReportView};
