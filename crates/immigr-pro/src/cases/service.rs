use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    CaseId, CaseNote, CaseRecord, CaseStatus, CaseSubmission, CaseUpdate, EvaluationSummary,
    NoteRequest, StatusCount,
};
use super::export::write_csv;
use super::query::{CasePage, CaseQuery};
use super::repository::{AuditEntry, AuditSink, CaseRepository, RepositoryError};
use crate::config::CasesConfig;
use crate::eligibility::{ApplicantProfile, EligibilityEngine, EvaluationResult};
use crate::intake::{validate_profile, ProfileViolation};

const UNKNOWN_ACTOR: &str = "unknown-admin";

/// Service composing intake validation, the eligibility engine, storage and the audit trail.
pub struct CaseService<R, A> {
    repository: Arc<R>,
    audit: Arc<A>,
    engine: Arc<EligibilityEngine>,
    limits: CasesConfig,
    sequence: AtomicU64,
}

impl<R, A> CaseService<R, A>
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    pub fn new(
        repository: Arc<R>,
        audit: Arc<A>,
        engine: EligibilityEngine,
        limits: CasesConfig,
    ) -> Self {
        Self {
            repository,
            audit,
            engine: Arc::new(engine),
            limits,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_case_id(&self) -> CaseId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        CaseId(format!("case-{id:06}"))
    }

    /// Evaluate a profile without storing anything. Partially filled profiles are scored
    /// with their defaults; only stored submissions are range-checked.
    pub fn evaluate_profile(&self, profile: &ApplicantProfile) -> EvaluationResult {
        self.engine.evaluate(profile)
    }

    /// Submit a questionnaire, evaluating it immediately.
    pub fn submit(&self, submission: CaseSubmission) -> Result<CaseRecord, CaseServiceError> {
        validate_profile(&submission.profile)?;
        let result = self.engine.evaluate(&submission.profile);
        let now = Utc::now();

        let mut record = CaseRecord {
            id: self.next_case_id(),
            applicant: submission.applicant,
            status: CaseStatus::Submitted,
            profile: submission.profile,
            evaluation: None,
            program_suggestion: None,
            budget_estimate: None,
            score: None,
            counselor: None,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        record.apply_evaluation(result, now);

        let stored = self.repository.insert(record)?;
        info!(case_id = %stored.id.as_str(), score = ?stored.score, "case submitted");

        let mut details = BTreeMap::new();
        if let Some(program) = &stored.program_suggestion {
            details.insert("program".to_string(), program.clone());
        }
        self.audit("case.submitted", &stored.id, None, details);

        Ok(stored)
    }

    /// Fetch a case for API responses.
    pub fn get(&self, id: &CaseId) -> Result<CaseRecord, CaseServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn evaluation(&self, id: &CaseId) -> Result<EvaluationSummary, CaseServiceError> {
        Ok(self.get(id)?.evaluation_summary())
    }

    /// Re-run the engine against the stored profile, replacing the suggestion fields.
    pub fn reevaluate(&self, id: &CaseId) -> Result<EvaluationResult, CaseServiceError> {
        let mut record = self.get(id)?;
        let result = self.engine.evaluate(&record.profile);
        record.apply_evaluation(result.clone(), Utc::now());
        self.repository.update(record)?;

        let mut details = BTreeMap::new();
        if let Some(top) = &result.top_program {
            details.insert("program".to_string(), top.program_key.code().to_string());
            details.insert("score".to_string(), top.score.to_string());
        }
        self.audit("case.evaluated", id, None, details);

        Ok(result)
    }

    pub fn list(&self, query: &CaseQuery) -> Result<CasePage, CaseServiceError> {
        let records = self.repository.all()?;
        Ok(query.paginate(records, &self.limits))
    }

    /// Number of cases per status, every status included.
    pub fn status_counts(&self) -> Result<Vec<StatusCount>, CaseServiceError> {
        let records = self.repository.all()?;
        Ok(CaseStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: records
                    .iter()
                    .filter(|record| record.status == status)
                    .count(),
            })
            .collect())
    }

    /// Apply an admin patch and record who made it.
    pub fn update(&self, id: &CaseId, update: CaseUpdate) -> Result<CaseRecord, CaseServiceError> {
        let mut record = self.get(id)?;
        if update.is_empty() {
            return Ok(record);
        }
        let actor = update.actor.clone();
        let details = update_details(&update);

        record.apply_update(update, Utc::now());
        self.repository.update(record.clone())?;
        self.audit("admin.update", id, actor, details);

        Ok(record)
    }

    pub fn add_note(&self, id: &CaseId, note: NoteRequest) -> Result<CaseRecord, CaseServiceError> {
        let text = note.text.trim();
        if text.is_empty() {
            return Err(CaseServiceError::EmptyNote);
        }

        let mut record = self.get(id)?;
        let now = Utc::now();
        let author = actor_or_default(note.actor.clone());
        record.notes.push(CaseNote {
            at: now,
            author: author.clone(),
            text: text.to_string(),
        });
        record.updated_at = now;
        self.repository.update(record.clone())?;

        let mut details = BTreeMap::new();
        details.insert("text".to_string(), text.to_string());
        self.audit("admin.add_note", id, Some(author), details);

        Ok(record)
    }

    /// Export the page selected by `query` as CSV.
    pub fn export_csv(&self, query: &CaseQuery) -> Result<Vec<u8>, CaseServiceError> {
        let page = self.list(query)?;
        Ok(write_csv(&page.items)?)
    }

    fn audit(
        &self,
        action: &str,
        target: &CaseId,
        actor: Option<String>,
        details: BTreeMap<String, String>,
    ) {
        let entry = AuditEntry {
            at: Utc::now(),
            action: action.to_string(),
            target_id: target.clone(),
            actor: actor_or_default(actor),
            details,
        };

        // The trail is best effort; a failing sink never fails the request.
        if let Err(err) = self.audit.record(entry) {
            warn!(action, case_id = %target.as_str(), error = %err, "audit entry dropped");
        }
    }
}

fn actor_or_default(actor: Option<String>) -> String {
    actor
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_ACTOR.to_string())
}

fn update_details(update: &CaseUpdate) -> BTreeMap<String, String> {
    let mut details = BTreeMap::new();
    if let Some(status) = update.status {
        details.insert("status".to_string(), status.label().to_string());
    }
    if let Some(program) = &update.program_suggestion {
        details.insert("programSuggestion".to_string(), program.clone());
    }
    if let Some(budget) = update.budget_estimate {
        details.insert("budgetEstimate".to_string(), budget.to_string());
    }
    if let Some(score) = update.score {
        details.insert("score".to_string(), score.to_string());
    }
    if let Some(counselor) = &update.counselor {
        details.insert("counselor".to_string(), counselor.clone());
    }
    details
}

/// Error raised by the case service.
#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error(transparent)]
    InvalidProfile(#[from] ProfileViolation),
    #[error("note text must not be empty")]
    EmptyNote,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),
}
