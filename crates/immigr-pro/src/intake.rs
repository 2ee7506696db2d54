//! Boundary validation applied before a profile reaches the engine.
//!
//! The engine tolerates any well-typed value; this guard rejects answers the questionnaire
//! itself would never accept, so stored cases only hold plausible profiles.

use std::ops::RangeInclusive;

use crate::eligibility::{ApplicantProfile, LanguageInput, SkillScores};

pub const AGE_RANGE: RangeInclusive<u32> = 18..=60;
pub const OVERALL_BAND_RANGE: RangeInclusive<f64> = 0.0..=9.0;
pub const DIRECT_LEVEL_RANGE: RangeInclusive<f64> = 1.0..=12.0;
pub const TEST_SCORE_RANGE: RangeInclusive<f64> = 0.0..=700.0;

/// Validation errors raised for implausible questionnaire answers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("age must be between 18 and 60 (found {0})")]
    AgeOutOfRange(u32),
    #[error("overall band must be between 0.0 and 9.0 (found {0})")]
    OverallBandOutOfRange(f64),
    #[error("{mode} {skill} score out of range (found {value})")]
    SkillScoreOutOfRange {
        mode: &'static str,
        skill: &'static str,
        value: f64,
    },
    #[error("{field} must be a finite, non-negative number (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
}

/// Check a profile against the questionnaire's accepted ranges.
pub fn validate_profile(profile: &ApplicantProfile) -> Result<(), ProfileViolation> {
    if !AGE_RANGE.contains(&profile.age) {
        return Err(ProfileViolation::AgeOutOfRange(profile.age));
    }

    match &profile.language_input {
        LanguageInput::Overall { overall } => {
            if !OVERALL_BAND_RANGE.contains(overall) {
                return Err(ProfileViolation::OverallBandOutOfRange(*overall));
            }
        }
        LanguageInput::ScaleA(scores) => check_skills("scaleA", scores, &DIRECT_LEVEL_RANGE)?,
        LanguageInput::ScaleB(scores) => check_skills("scaleB", scores, &TEST_SCORE_RANGE)?,
        LanguageInput::ScaleC(scores) => check_skills("scaleC", scores, &TEST_SCORE_RANGE)?,
    }

    check_amount("foreignExperienceYears", profile.foreign_experience_years)?;
    check_amount("canadianExperienceYears", profile.canadian_experience_years)?;
    check_amount("availableFundsAmount", profile.available_funds_amount)?;

    Ok(())
}

fn check_skills(
    mode: &'static str,
    scores: &SkillScores,
    range: &RangeInclusive<f64>,
) -> Result<(), ProfileViolation> {
    let skills = [
        ("listening", scores.listening),
        ("speaking", scores.speaking),
        ("reading", scores.reading),
        ("writing", scores.writing),
    ];

    for (skill, value) in skills {
        if !range.contains(&value) {
            return Err(ProfileViolation::SkillScoreOutOfRange { mode, skill, value });
        }
    }
    Ok(())
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ProfileViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileViolation::NegativeAmount { field, value })
    }
}
