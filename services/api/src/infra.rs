use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

use civic_report::reports::{Report, ReportStorage, SessionStorage, StorageError};
use civic_report::session::SessionRecord;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryReportStorage {
    reports: Mutex<Vec<Report>>,
}

impl ReportStorage for InMemoryReportStorage {
    fn load(&self) -> Result<Vec<Report>, StorageError> {
        Ok(self.reports.lock().expect("report mutex poisoned").clone())
    }

    fn save(&self, reports: &[Report]) -> Result<(), StorageError> {
        *self.reports.lock().expect("report mutex poisoned") = reports.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySessionStorage {
    session: Mutex<Option<SessionRecord>>,
}

impl SessionStorage for InMemorySessionStorage {
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

/// Single-document persisted state, the analog of the prototype's
/// per-browser key-value store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    session: Option<SessionRecord>,
    #[serde(default)]
    reports: Vec<Report>,
}

/// JSON state file with whole-document read-modify-write semantics.
///
/// Implements both storage traits so one file can back the desk the way
/// one origin's key-value store backed the prototype. The internal lock
/// keeps each save's read-modify-write atomic within this process.
pub(crate) struct JsonStateFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStateFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn read_state(&self) -> Result<PersistedState, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt(err.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(PersistedState::default())
            }
            Err(err) => Err(StorageError::Unavailable(err.to_string())),
        }
    }

    fn write_state(&self, state: &PersistedState) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| StorageError::Unavailable(err.to_string()))
    }
}

impl ReportStorage for JsonStateFile {
    fn load(&self) -> Result<Vec<Report>, StorageError> {
        let _guard = self.lock.lock().expect("state mutex poisoned");
        Ok(self.read_state()?.reports)
    }

    fn save(&self, reports: &[Report]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().expect("state mutex poisoned");
        let mut state = self.read_state()?;
        state.reports = reports.to_vec();
        self.write_state(&state)
    }
}

impl SessionStorage for JsonStateFile {
    fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        let _guard = self.lock.lock().expect("state mutex poisoned");
        Ok(self.read_state()?.session)
    }

    fn save(&self, session: &SessionRecord) -> Result<(), StorageError> {
        let _guard = self.lock.lock().expect("state mutex poisoned");
        let mut state = self.read_state()?;
        state.session = Some(session.clone());
        self.write_state(&state)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().expect("state mutex poisoned");
        let mut state = self.read_state()?;
        state.session = None;
        self.write_state(&state)
    }
}
