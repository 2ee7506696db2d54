//! Static point tables behind the composite score.

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, EducationLevel, MaritalStatus};
use super::language::ProficiencyLevels;

pub const MAX_COMPOSITE_SCORE: u16 = 600;
pub const LANGUAGE_POINTS_CAP: u16 = 160;
pub const ARRANGED_EMPLOYMENT_POINTS: u16 = 50;
pub const CANADIAN_EXPERIENCE_CAP_YEARS: u8 = 5;

/// Share of the single-applicant points kept when points are split with a spouse.
const MARRIED_FACTOR: f64 = 0.9;

/// Points for ages 30 to 44; 18 to 29 earn the flat maximum.
const AGE_POINTS_FROM_30: [u16; 15] = [105, 99, 94, 88, 83, 77, 72, 66, 61, 55, 50, 39, 28, 17, 6];
const AGE_POINTS_UNDER_30: u16 = 110;

const CANADIAN_EXPERIENCE_POINTS: [u16; 6] = [0, 35, 46, 56, 63, 72];

pub fn age_points(age: u32) -> u16 {
    match age {
        18..=29 => AGE_POINTS_UNDER_30,
        30..=44 => AGE_POINTS_FROM_30[(age - 30) as usize],
        _ => 0,
    }
}

pub fn education_points(education: EducationLevel) -> u16 {
    match education {
        EducationLevel::HighSchool => 30,
        EducationLevel::College => 60,
        EducationLevel::Bachelor => 98,
        EducationLevel::Master => 126,
        EducationLevel::Doctorate => 140,
    }
}

/// Points for a single skill at the given proficiency level.
pub fn skill_points(level: u8) -> u16 {
    match level {
        5 => 1,
        6 => 3,
        7 => 6,
        8 => 8,
        9 => 10,
        10..=12 => 12,
        _ => 0,
    }
}

pub fn language_points(levels: &ProficiencyLevels) -> u16 {
    let total: u16 = levels.iter().map(|(_, level)| skill_points(level)).sum();
    total.min(LANGUAGE_POINTS_CAP)
}

/// Whole years of Canadian experience, capped at five.
pub fn canadian_experience_points(years: f64) -> u16 {
    let whole_years = if years.is_finite() && years > 0.0 {
        years
            .floor()
            .min(f64::from(CANADIAN_EXPERIENCE_CAP_YEARS)) as usize
    } else {
        0
    };
    CANADIAN_EXPERIENCE_POINTS[whole_years]
}

pub fn arranged_employment_points(has_validated_job_offer: bool) -> u16 {
    if has_validated_job_offer {
        ARRANGED_EMPLOYMENT_POINTS
    } else {
        0
    }
}

/// Apply the married reduction to one subtotal, rounding to the nearest point.
pub fn adjust_for_marital_status(points: u16, status: MaritalStatus) -> u16 {
    if status.is_married() {
        (f64::from(points) * MARRIED_FACTOR).round() as u16
    } else {
        points
    }
}

/// Per-factor contributions to the composite score, after the married adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub age: u16,
    pub education: u16,
    pub language: u16,
    pub canadian_experience: u16,
    pub arranged_employment: u16,
    pub composite: u16,
}

/// Compute the composite score for a profile whose levels were already normalized.
pub fn composite(profile: &ApplicantProfile, levels: &ProficiencyLevels) -> ScoreBreakdown {
    let status = profile.marital_status;
    let age = adjust_for_marital_status(age_points(profile.age), status);
    let education = adjust_for_marital_status(education_points(profile.education), status);
    let language = adjust_for_marital_status(language_points(levels), status);
    let canadian_experience = adjust_for_marital_status(
        canadian_experience_points(profile.canadian_experience()),
        status,
    );
    let arranged_employment = arranged_employment_points(profile.has_validated_job_offer);

    let total = u32::from(age)
        + u32::from(education)
        + u32::from(language)
        + u32::from(canadian_experience)
        + u32::from(arranged_employment);

    ScoreBreakdown {
        age,
        education,
        language,
        canadian_experience,
        arranged_employment,
        composite: total.min(u32::from(MAX_COMPOSITE_SCORE)) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_table_matches_published_steps() {
        assert_eq!(age_points(17), 0);
        assert_eq!(age_points(18), 110);
        assert_eq!(age_points(29), 110);
        assert_eq!(age_points(30), 105);
        assert_eq!(age_points(35), 77);
        assert_eq!(age_points(41), 39);
        assert_eq!(age_points(44), 6);
        assert_eq!(age_points(45), 0);
        assert_eq!(age_points(60), 0);
    }

    #[test]
    fn language_points_sum_all_skills() {
        let levels = ProficiencyLevels {
            listening: 7,
            speaking: 8,
            reading: 9,
            writing: 12,
        };

        assert_eq!(language_points(&levels), 6 + 8 + 10 + 12);
        assert_eq!(language_points(&ProficiencyLevels::uniform(4)), 0);
        assert_eq!(language_points(&ProficiencyLevels::uniform(0)), 0);
    }

    #[test]
    fn canadian_experience_is_floored_and_capped() {
        assert_eq!(canadian_experience_points(0.0), 0);
        assert_eq!(canadian_experience_points(1.9), 35);
        assert_eq!(canadian_experience_points(3.0), 56);
        assert_eq!(canadian_experience_points(12.0), 72);
        assert_eq!(canadian_experience_points(-1.0), 0);
    }

    #[test]
    fn married_adjustment_rounds_each_subtotal() {
        assert_eq!(adjust_for_marital_status(105, MaritalStatus::Married), 95);
        assert_eq!(adjust_for_marital_status(98, MaritalStatus::Married), 88);
        assert_eq!(adjust_for_marital_status(98, MaritalStatus::Single), 98);
    }
}
