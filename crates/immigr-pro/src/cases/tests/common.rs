use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::cases::domain::{ApplicantContact, CaseId, CaseRecord, CaseStatus, CaseSubmission};
use crate::cases::repository::{
    AuditEntry, AuditError, AuditSink, CaseRepository, RepositoryError,
};
use crate::cases::{case_router, CaseService};
use crate::config::CasesConfig;
use crate::eligibility::{
    ApplicantProfile, EducationLevel, EligibilityEngine, LanguageInput, MaritalStatus,
    SponsorshipRelation,
};

pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 27,
        marital_status: MaritalStatus::Single,
        education: EducationLevel::Bachelor,
        language_input: LanguageInput::Overall { overall: 6.5 },
        foreign_experience_years: 3.0,
        canadian_experience_years: 0.0,
        has_validated_job_offer: false,
        target_province: "Ontario".to_string(),
        available_funds_amount: 15_000.0,
        sponsorship_relation: SponsorshipRelation::None,
    }
}

pub(super) fn submission() -> CaseSubmission {
    CaseSubmission {
        applicant: ApplicantContact {
            full_name: "Amina Diallo".to_string(),
            email: "amina@example.com".to_string(),
        },
        profile: profile(),
    }
}

pub(super) fn underage_submission() -> CaseSubmission {
    let mut submission = submission();
    submission.profile.age = 16;
    submission
}

pub(super) fn limits() -> CasesConfig {
    CasesConfig {
        default_page_size: 2,
        max_page_size: 3,
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Stored record created `minutes` after a fixed base time.
pub(super) fn record(
    id: &str,
    full_name: &str,
    status: CaseStatus,
    score: Option<u16>,
    minutes: i64,
) -> CaseRecord {
    let at = base_time() + Duration::minutes(minutes);
    CaseRecord {
        id: CaseId(id.to_string()),
        applicant: ApplicantContact {
            full_name: full_name.to_string(),
            email: format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
        },
        status,
        profile: profile(),
        evaluation: None,
        program_suggestion: Some("Express Entry: Federal Skilled Worker (FSW)".to_string()),
        budget_estimate: score.map(|value| u32::from(value) * 10),
        score,
        counselor: None,
        notes: Vec::new(),
        created_at: at,
        updated_at: at,
    }
}

pub(super) fn build_service() -> (
    CaseService<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = CaseService::new(
        repository.clone(),
        audit.clone(),
        EligibilityEngine::default(),
        limits(),
    );
    (service, repository, audit)
}

pub(super) fn router_with_service(
    service: CaseService<MemoryRepository, MemoryAudit>,
) -> axum::Router {
    case_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for MemoryRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAudit {
    pub(super) fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}

pub(super) struct OfflineAudit;

impl AuditSink for OfflineAudit {
    fn record(&self, _entry: AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("audit store offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl CaseRepository for ConflictRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(None)
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CaseRepository for UnavailableRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
