use crate::eligibility::{
    ApplicantProfile, EducationLevel, EligibilityEngine, EligibilityPolicy, LanguageInput,
    MaritalStatus, SkillScores, SponsorshipRelation,
};

/// Default questionnaire answers: 27, bachelor, band 6.5, three years abroad, Ontario.
pub(super) fn baseline_profile() -> ApplicantProfile {
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

/// Nothing filled in beyond what the caller sets.
pub(super) fn minimal_profile() -> ApplicantProfile {
    ApplicantProfile::default()
}

pub(super) fn direct_levels(
    listening: f64,
    speaking: f64,
    reading: f64,
    writing: f64,
) -> LanguageInput {
    LanguageInput::ScaleA(SkillScores::new(listening, speaking, reading, writing))
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityPolicy::default())
}
