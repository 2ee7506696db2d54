use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::eligibility::{ApplicantProfile, EvaluationResult, ProgramCandidate};

/// Identifier wrapper for stored cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl CaseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Processing stage of a case, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    Draft,
    Submitted,
    Review,
    WaitingInfo,
    InProgress,
    Done,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 6] = [
        CaseStatus::Draft,
        CaseStatus::Submitted,
        CaseStatus::Review,
        CaseStatus::WaitingInfo,
        CaseStatus::InProgress,
        CaseStatus::Done,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CaseStatus::Draft => "draft",
            CaseStatus::Submitted => "submitted",
            CaseStatus::Review => "review",
            CaseStatus::WaitingInfo => "waiting-info",
            CaseStatus::InProgress => "in-progress",
            CaseStatus::Done => "done",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(value))
    }
}

/// Who the case belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantContact {
    pub full_name: String,
    pub email: String,
}

/// Inbound questionnaire submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSubmission {
    #[serde(default)]
    pub applicant: ApplicantContact,
    pub profile: ApplicantProfile,
}

/// Free-text note left by a counselor or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseNote {
    pub at: DateTime<Utc>,
    pub author: String,
    pub text: String,
}

/// Stored case: the submitted profile, its latest evaluation, and admin-managed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: CaseId,
    pub applicant: ApplicantContact,
    pub status: CaseStatus,
    pub profile: ApplicantProfile,
    pub evaluation: Option<EvaluationResult>,
    pub program_suggestion: Option<String>,
    pub budget_estimate: Option<u32>,
    pub score: Option<u16>,
    pub counselor: Option<String>,
    pub notes: Vec<CaseNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRecord {
    /// Store a fresh evaluation and copy its top program into the admin-facing fields.
    pub fn apply_evaluation(&mut self, result: EvaluationResult, at: DateTime<Utc>) {
        if let Some(top) = &result.top_program {
            self.program_suggestion = Some(top.display_label.clone());
            self.score = Some(top.score);
            self.budget_estimate = Some(top.estimated_budget);
        }
        self.evaluation = Some(result);
        self.updated_at = at;
    }

    pub fn apply_update(&mut self, update: CaseUpdate, at: DateTime<Utc>) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(program) = update.program_suggestion {
            self.program_suggestion = Some(program);
        }
        if let Some(budget) = update.budget_estimate {
            self.budget_estimate = Some(budget);
        }
        if let Some(score) = update.score {
            self.score = Some(score);
        }
        if let Some(counselor) = update.counselor {
            self.counselor = Some(counselor);
        }
        self.updated_at = at;
    }

    pub fn evaluation_summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            case_id: self.id.clone(),
            program: self.program_suggestion.clone(),
            score: self.score,
            budget: self.budget_estimate,
            recommendations: self
                .evaluation
                .as_ref()
                .map(|result| result.alternatives.clone())
                .unwrap_or_default(),
        }
    }
}

/// Partial admin patch; absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseUpdate {
    pub status: Option<CaseStatus>,
    pub program_suggestion: Option<String>,
    pub budget_estimate: Option<u32>,
    pub score: Option<u16>,
    pub counselor: Option<String>,
    pub actor: Option<String>,
}

impl CaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.program_suggestion.is_none()
            && self.budget_estimate.is_none()
            && self.score.is_none()
            && self.counselor.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteRequest {
    pub text: String,
    pub actor: Option<String>,
}

/// What the applicant dashboard shows for a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub case_id: CaseId,
    pub program: Option<String>,
    pub score: Option<u16>,
    pub budget: Option<u32>,
    pub recommendations: Vec<ProgramCandidate>,
}

/// Case count for one status, for dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: CaseStatus,
    pub count: usize,
}
