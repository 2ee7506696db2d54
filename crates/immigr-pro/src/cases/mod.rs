//! Case intake and administration around the eligibility engine.
//!
//! A case is one submitted questionnaire together with its latest evaluation and the fields
//! counselors manage from the admin dashboard. Storage and the audit trail are traits so the
//! service runs against in-memory adapters in tests and in the demo server.

pub mod domain;
mod export;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantContact, CaseId, CaseNote, CaseRecord, CaseStatus, CaseSubmission, CaseUpdate,
    EvaluationSummary, NoteRequest, StatusCount,
};
pub use query::{CasePage, CaseQuery, SortDirection, SortKey};
pub use repository::{AuditEntry, AuditError, AuditSink, CaseRepository, RepositoryError};
pub use router::case_router;
pub use service::{CaseService, CaseServiceError};
