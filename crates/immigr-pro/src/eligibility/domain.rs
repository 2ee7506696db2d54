use serde::{Deserialize, Serialize};

/// Marital status declared by the principal applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaritalStatus {
    #[default]
    Single,
    #[serde(alias = "commonLaw", alias = "married/common-law")]
    Married,
}

impl MaritalStatus {
    pub const fn is_married(self) -> bool {
        matches!(self, MaritalStatus::Married)
    }
}

/// Highest completed level of education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationLevel {
    #[default]
    #[serde(alias = "highschool")]
    HighSchool,
    College,
    Bachelor,
    Master,
    #[serde(alias = "phd")]
    Doctorate,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High school",
            EducationLevel::College => "College diploma",
            EducationLevel::Bachelor => "Bachelor's degree",
            EducationLevel::Master => "Master's degree",
            EducationLevel::Doctorate => "Doctorate",
        }
    }
}

/// Family relation declared for a sponsorship enquiry. Never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SponsorshipRelation {
    #[default]
    None,
    Spouse,
    Parent,
    Child,
}

impl SponsorshipRelation {
    pub const fn is_declared(self) -> bool {
        !matches!(self, SponsorshipRelation::None)
    }

    pub const fn label(self) -> &'static str {
        match self {
            SponsorshipRelation::None => "None",
            SponsorshipRelation::Spouse => "Spouse",
            SponsorshipRelation::Parent => "Parent",
            SponsorshipRelation::Child => "Child",
        }
    }
}

/// Raw per-skill test results, interpreted according to the enclosing scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillScores {
    #[serde(rename = "L")]
    pub listening: f64,
    #[serde(rename = "S")]
    pub speaking: f64,
    #[serde(rename = "R")]
    pub reading: f64,
    #[serde(rename = "W")]
    pub writing: f64,
}

impl SkillScores {
    pub const fn new(listening: f64, speaking: f64, reading: f64, writing: f64) -> Self {
        Self {
            listening,
            speaking,
            reading,
            writing,
        }
    }
}

/// Language test results as collected by the questionnaire.
///
/// `Overall` carries a single general-test band; the scale variants carry one score per
/// skill. Scale A is already expressed in proficiency levels (1 to 12), scales B and C are
/// 0 to 700 test scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum LanguageInput {
    Overall {
        #[serde(default)]
        overall: f64,
    },
    ScaleA(SkillScores),
    ScaleB(SkillScores),
    ScaleC(SkillScores),
}

impl Default for LanguageInput {
    fn default() -> Self {
        LanguageInput::Overall { overall: 0.0 }
    }
}

impl LanguageInput {
    pub const fn mode(&self) -> &'static str {
        match self {
            LanguageInput::Overall { .. } => "overall",
            LanguageInput::ScaleA(_) => "scaleA",
            LanguageInput::ScaleB(_) => "scaleB",
            LanguageInput::ScaleC(_) => "scaleC",
        }
    }
}

/// One evaluation input. Every field has a safe default so partially filled
/// questionnaires still deserialize and evaluate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantProfile {
    pub age: u32,
    pub marital_status: MaritalStatus,
    pub education: EducationLevel,
    pub language_input: LanguageInput,
    pub foreign_experience_years: f64,
    pub canadian_experience_years: f64,
    pub has_validated_job_offer: bool,
    pub target_province: String,
    pub available_funds_amount: f64,
    pub sponsorship_relation: SponsorshipRelation,
}

impl ApplicantProfile {
    /// Foreign experience with non-finite or negative values read as zero.
    pub fn foreign_experience(&self) -> f64 {
        non_negative(self.foreign_experience_years)
    }

    pub fn canadian_experience(&self) -> f64 {
        non_negative(self.canadian_experience_years)
    }

    pub fn available_funds(&self) -> f64 {
        non_negative(self.available_funds_amount)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_profile_deserializes_with_safe_defaults() {
        let profile: ApplicantProfile =
            serde_json::from_value(json!({ "age": 31 })).expect("profile parses");

        assert_eq!(profile.age, 31);
        assert_eq!(profile.marital_status, MaritalStatus::Single);
        assert_eq!(profile.language_input, LanguageInput::Overall { overall: 0.0 });
        assert!(!profile.has_validated_job_offer);
        assert_eq!(profile.sponsorship_relation, SponsorshipRelation::None);
    }

    #[test]
    fn language_input_is_tagged_by_mode() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "languageInput": { "mode": "scaleB", "L": 320, "S": 280, "R": 410 }
        }))
        .expect("profile parses");

        match profile.language_input {
            LanguageInput::ScaleB(scores) => {
                assert_eq!(scores.listening, 320.0);
                assert_eq!(scores.reading, 410.0);
                assert_eq!(scores.writing, 0.0);
            }
            other => panic!("expected scale B input, got {other:?}"),
        }
    }

    #[test]
    fn negative_experience_reads_as_zero() {
        let profile = ApplicantProfile {
            foreign_experience_years: -2.0,
            canadian_experience_years: f64::NAN,
            ..ApplicantProfile::default()
        };

        assert_eq!(profile.foreign_experience(), 0.0);
        assert_eq!(profile.canadian_experience(), 0.0);
    }
}
