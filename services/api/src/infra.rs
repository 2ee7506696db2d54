use immigr_pro::cases::{
    AuditEntry, AuditError, AuditSink, CaseId, CaseRecord, CaseRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseRepository {
    records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl InMemoryCaseRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<CaseId, CaseRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("case store lock poisoned".to_string()))
    }
}

impl CaseRepository for InMemoryCaseRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| AuditError::Unavailable("audit lock poisoned".to_string()))?;
        guard.push(entry);
        Ok(())
    }
}

impl InMemoryAuditSink {
    pub(crate) fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
