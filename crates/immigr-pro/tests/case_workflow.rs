use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use immigr_pro::cases::{
    AuditEntry, AuditError, AuditSink, CaseId, CaseQuery, CaseRecord, CaseRepository,
    CaseService, CaseStatus, CaseSubmission, CaseUpdate, NoteRequest, RepositoryError, SortKey,
};
use immigr_pro::config::CasesConfig;
use immigr_pro::eligibility::{EligibilityEngine, ProgramKey};

#[derive(Default)]
struct StubRepository {
    records: Mutex<HashMap<CaseId, CaseRecord>>,
}

impl CaseRepository for StubRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("lock")
            .insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(self.records.lock().expect("lock").values().cloned().collect())
    }
}

#[derive(Default)]
struct StubAudit {
    actions: Mutex<Vec<String>>,
}

impl AuditSink for StubAudit {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.actions.lock().expect("lock").push(entry.action);
        Ok(())
    }
}

fn submission(full_name: &str, body: &str) -> CaseSubmission {
    let raw = format!(r#"{{ "applicant": {{ "fullName": "{full_name}", "email": "x@example.com" }}, "profile": {body} }}"#);
    serde_json::from_str(&raw).expect("submission payload")
}

#[test]
fn counselor_works_a_case_from_submission_to_export() {
    let audit = Arc::new(StubAudit::default());
    let service = CaseService::new(
        Arc::new(StubRepository::default()),
        audit.clone(),
        EligibilityEngine::default(),
        CasesConfig::default(),
    );

    let skilled = service
        .submit(submission(
            "Noor Haddad",
            r#"{ "age": 29, "education": "master",
                 "languageInput": { "mode": "overall", "overall": 8 },
                 "foreignExperienceYears": 4, "availableFundsAmount": 18000,
                 "targetProvince": "Manitoba" }"#,
        ))
        .expect("skilled worker case");
    let visitor = service
        .submit(submission("Tomás Ruiz", r#"{ "age": 45 }"#))
        .expect("sparse case");

    let skilled_summary = service.evaluation(&skilled.id).expect("summary");
    assert_eq!(
        skilled_summary
            .recommendations
            .first()
            .map(|candidate| candidate.program_key),
        Some(ProgramKey::FederalSkilledWorker)
    );
    let visitor_summary = service.evaluation(&visitor.id).expect("summary");
    assert_eq!(
        visitor_summary
            .recommendations
            .first()
            .map(|candidate| candidate.program_key),
        Some(ProgramKey::TemporaryWork)
    );

    service
        .update(
            &skilled.id,
            CaseUpdate {
                status: Some(CaseStatus::InProgress),
                counselor: Some("Marc".to_string()),
                actor: Some("marc@immigr.pro".to_string()),
                ..CaseUpdate::default()
            },
        )
        .expect("status change");
    service
        .add_note(
            &skilled.id,
            NoteRequest {
                text: "Language results verified".to_string(),
                actor: Some("Marc".to_string()),
            },
        )
        .expect("note");

    let in_progress = service
        .list(&CaseQuery {
            status: Some(CaseStatus::InProgress),
            ..CaseQuery::default()
        })
        .expect("listing");
    assert_eq!(in_progress.total, 1);
    assert_eq!(in_progress.items[0].notes.len(), 1);

    let by_score = service
        .list(&CaseQuery {
            sort: SortKey::Score,
            ..CaseQuery::default()
        })
        .expect("listing");
    assert_eq!(by_score.items[0].id, skilled.id);

    let csv = String::from_utf8(
        service
            .export_csv(&CaseQuery::default())
            .expect("export"),
    )
    .expect("utf-8");
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("in-progress"));

    let actions = audit.actions.lock().expect("lock").clone();
    assert_eq!(
        actions,
        vec![
            "case.submitted",
            "case.submitted",
            "admin.update",
            "admin.add_note",
        ]
    );
}
