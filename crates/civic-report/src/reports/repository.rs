use super::domain::Report;
use crate::session::SessionRecord;

/// Whole-collection persistence boundary for reports.
///
/// Read-and-replace semantics: a logical operation loads the full
/// collection, transforms it, and saves the full collection back. There is
/// no field-level persistence, so in a multi-writer host the load/save
/// pair must sit inside one exclusion boundary.
pub trait ReportStorage: Send + Sync {
    fn load(&self) -> Result<Vec<Report>, StorageError>;
    fn save(&self, reports: &[Report]) -> Result<(), StorageError>;
}

/// Persistence boundary for the single session record.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<SessionRecord>, StorageError>;
    fn save(&self, session: &SessionRecord) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("stored payload could not be decoded: {0}")]
    Corrupt(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Defensive migration pass applied after every load.
///
/// Records persisted by earlier revisions may carry out-of-range numeric
/// fields; missing award flags and ranks already repair through serde
/// defaults. Nothing here is surfaced as an error.
pub fn sanitize(reports: Vec<Report>) -> Vec<Report> {
    reports
        .into_iter()
        .map(|mut report| {
            report.severity = report.severity.min(100);
            report.risk_score = report.risk_score.min(100);
            report
        })
        .collect()
}
