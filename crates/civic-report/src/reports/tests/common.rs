use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::reports::domain::{
    AwardedStages, CitizenId, IssueCategory, Report, ReportDraft, ReportId, ReportStatus, UNRANKED,
};
use crate::reports::repository::{ReportStorage, SessionStorage, StorageError};
use crate::reports::service::ReportDeskService;
use crate::runtime::{Clock, Randomness};
use crate::session::SessionRecord;

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid base time")
}

pub(super) fn at_minutes(offset: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(offset)
}

pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Deterministic randomness: pops scripted draws first, then walks a fixed
/// sequence so id generation always makes progress.
pub(super) struct ScriptedRandomness {
    draws: Mutex<VecDeque<f64>>,
    fallback: AtomicUsize,
}

impl ScriptedRandomness {
    pub(super) fn with_draws(values: &[f64]) -> Self {
        Self {
            draws: Mutex::new(values.iter().copied().collect()),
            fallback: AtomicUsize::new(0),
        }
    }

    pub(super) fn empty() -> Self {
        Self::with_draws(&[])
    }
}

impl Randomness for ScriptedRandomness {
    fn next_unit(&self) -> f64 {
        let mut guard = self.draws.lock().expect("rng mutex poisoned");
        if let Some(value) = guard.pop_front() {
            return value;
        }
        let step = self.fallback.fetch_add(1, Ordering::Relaxed);
        ((step * 31 + 7) % 101) as f64 / 101.0
    }
}

#[derive(Default)]
pub(super) struct MemoryReportStorage {
    pub(super) reports: Mutex<Vec<Report>>,
}

impl MemoryReportStorage {
    pub(super) fn seeded(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(reports),
        }
    }

    pub(super) fn snapshot(&self) -> Vec<Report> {
        self.reports.lock().expect("report mutex poisoned").clone()
    }
}

impl ReportStorage for MemoryReportStorage {
    fn load(&self) -> Result<Vec<Report>, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&self, reports: &[Report]) -> Result<(), StorageError> {
        *self.reports.lock().expect("report mutex poisoned") = reports.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemorySessionStorage {
    session: Mutex<Option<SessionRecord>>,
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        Ok(self.session.lock().expect("session mutex poisoned").clone())
    }

    fn save(&self, session: &SessionRecord) -> Result<(), StorageError> {
        *self.session.lock().expect("session mutex poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.session.lock().expect("session mutex poisoned") = None;
        Ok(())
    }
}

pub(super) struct UnavailableStorage;

impl ReportStorage for UnavailableStorage {
    fn load(&self) -> Result<Vec<Report>, StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }

    fn save(&self, _reports: &[Report]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn draft() -> ReportDraft {
    ReportDraft {
        reporter: CitizenId("asha@example.com".to_string()),
        category: IssueCategory::Pothole,
        severity: 76,
        location_query: "MG Road / 5th Cross".to_string(),
        location_text: String::new(),
        image_name: "pothole-01.jpg".to_string(),
    }
}

/// Hand-built record for core-function tests that bypass intake.
pub(super) fn report(id: &str, risk: u8, status: ReportStatus, minutes: i64) -> Report {
    Report {
        id: ReportId(id.to_string()),
        created_at: at_minutes(minutes),
        reporter: CitizenId("asha@example.com".to_string()),
        category: IssueCategory::Pothole,
        severity: risk.min(100),
        risk_score: risk.min(100),
        location_query: "MG Road".to_string(),
        location_text: "MG Road".to_string(),
        status,
        priority_rank: UNRANKED,
        image_name: String::new(),
        awarded: AwardedStages::default(),
    }
}

pub(super) type MemoryDesk = ReportDeskService<MemoryReportStorage, MemorySessionStorage>;

pub(super) fn build_desk() -> (MemoryDesk, Arc<MemoryReportStorage>, Arc<MemorySessionStorage>) {
    build_desk_with(Vec::new())
}

pub(super) fn build_desk_with(
    seed: Vec<Report>,
) -> (MemoryDesk, Arc<MemoryReportStorage>, Arc<MemorySessionStorage>) {
    let reports = Arc::new(MemoryReportStorage::seeded(seed));
    let sessions = Arc::new(MemorySessionStorage::default());
    let desk = ReportDeskService::with_sources(
        reports.clone(),
        sessions.clone(),
        Arc::new(FixedClock(base_time())),
        Arc::new(ScriptedRandomness::empty()),
    );
    (desk, reports, sessions)
}
