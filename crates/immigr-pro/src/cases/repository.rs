use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CaseId, CaseRecord};

/// Storage abstraction so the case service can be exercised in isolation.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Append-only trail of case submissions and admin actions.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: String,
    pub target_id: CaseId,
    pub actor: String,
    pub details: BTreeMap<String, String>,
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
