//! Indicative eligibility scoring.
//!
//! The engine is a pure function of an [`ApplicantProfile`]: language results are normalized
//! to proficiency levels, a composite score is computed from the point tables, every program
//! predicate is run, and the eligible programs are ranked. No I/O, clock or shared state is
//! involved, so identical profiles always yield identical results.

pub mod domain;
pub mod language;
pub mod points;
mod policy;
pub mod programs;
pub mod ranking;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantProfile, EducationLevel, LanguageInput, MaritalStatus, SkillScores,
    SponsorshipRelation,
};
pub use language::{ProficiencyLevels, Skill};
pub use points::ScoreBreakdown;
pub use policy::{is_quebec, EligibilityPolicy};
pub use programs::{ProgramCandidate, ProgramKey, PROGRAMS};

use programs::Assessment;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator applying an [`EligibilityPolicy`] to applicant profiles.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    policy: EligibilityPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, profile: &ApplicantProfile) -> EvaluationResult {
        let proficiency = language::normalize(&profile.language_input);
        let breakdown = points::composite(profile, &proficiency);
        let assessment = Assessment {
            profile,
            proficiency,
            composite: breakdown.composite,
            policy: &self.policy,
        };

        let candidates = PROGRAMS
            .iter()
            .filter_map(|program| program.candidate(&assessment))
            .collect();
        let alternatives = ranking::rank(candidates);

        debug!(
            composite = breakdown.composite,
            language_mode = profile.language_input.mode(),
            ranked = ?alternatives.iter().map(|c| c.program_key.code()).collect::<Vec<_>>(),
            "eligibility evaluated"
        );

        EvaluationResult {
            top_program: alternatives.first().cloned(),
            alternatives,
            proficiency,
            breakdown,
        }
    }
}

/// Evaluate a profile with the default policy.
pub fn evaluate(profile: &ApplicantProfile) -> EvaluationResult {
    EligibilityEngine::default().evaluate(profile)
}

/// Top recommendation, full ranking, and the derived values behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Always present in practice: orientation programs are eligible for every profile.
    pub top_program: Option<ProgramCandidate>,
    pub alternatives: Vec<ProgramCandidate>,
    pub proficiency: ProficiencyLevels,
    pub breakdown: ScoreBreakdown,
}

impl EvaluationResult {
    pub fn candidate(&self, key: ProgramKey) -> Option<&ProgramCandidate> {
        self.alternatives
            .iter()
            .find(|candidate| candidate.program_key == key)
    }

    pub fn is_eligible(&self, key: ProgramKey) -> bool {
        self.candidate(key).is_some()
    }

    pub fn summary(&self) -> String {
        match &self.top_program {
            Some(top) => format!(
                "{} ({} pts, est. budget {})",
                top.display_label, top.score, top.estimated_budget
            ),
            None => "no eligible program".to_string(),
        }
    }
}
