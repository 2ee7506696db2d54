//! Program catalogue: one data entry per candidate program.
//!
//! Each entry bundles its admissibility predicate, scoring rule, budget and the reasons shown
//! to the applicant. Adding a program means adding an entry to [`PROGRAMS`]; entries are
//! listed in tie-break priority order.

use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;
use super::language::ProficiencyLevels;
use super::points::MAX_COMPOSITE_SCORE;
use super::policy::{is_quebec, EligibilityPolicy};

/// Identifier of every program the engine can recommend, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgramKey {
    #[serde(rename = "FSW")]
    FederalSkilledWorker,
    #[serde(rename = "CEC")]
    CanadianExperience,
    #[serde(rename = "FST")]
    FederalSkilledTrades,
    #[serde(rename = "PNP")]
    ProvincialNominee,
    #[serde(rename = "QUEBEC")]
    Quebec,
    #[serde(rename = "FAMILY")]
    FamilySponsorship,
    #[serde(rename = "STUDY")]
    StudyPermit,
    #[serde(rename = "WORK")]
    TemporaryWork,
    #[serde(rename = "VISITOR")]
    Visitor,
}

impl ProgramKey {
    pub const fn code(self) -> &'static str {
        match self {
            ProgramKey::FederalSkilledWorker => "FSW",
            ProgramKey::CanadianExperience => "CEC",
            ProgramKey::FederalSkilledTrades => "FST",
            ProgramKey::ProvincialNominee => "PNP",
            ProgramKey::Quebec => "QUEBEC",
            ProgramKey::FamilySponsorship => "FAMILY",
            ProgramKey::StudyPermit => "STUDY",
            ProgramKey::TemporaryWork => "WORK",
            ProgramKey::Visitor => "VISITOR",
        }
    }
}

/// One eligible program as surfaced to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCandidate {
    pub program_key: ProgramKey,
    pub display_label: String,
    pub score: u16,
    pub estimated_budget: u32,
    pub reasons: Vec<String>,
}

/// Everything a predicate or scorer may look at for one evaluation.
pub(crate) struct Assessment<'a> {
    pub(crate) profile: &'a ApplicantProfile,
    pub(crate) proficiency: ProficiencyLevels,
    pub(crate) composite: u16,
    pub(crate) policy: &'a EligibilityPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scoring {
    Composite,
    CompositePlusOfferBonus,
    ScaledComposite,
    OfferSignal,
    Informational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Fixed(&'static str),
    WithProvince(&'static str),
}

/// Static description of a program.
pub struct ProgramDefinition {
    key: ProgramKey,
    label: Label,
    budget: u32,
    scoring: Scoring,
    eligible: fn(&Assessment<'_>) -> bool,
    reasons: fn(&Assessment<'_>) -> Vec<String>,
}

impl ProgramDefinition {
    pub fn key(&self) -> ProgramKey {
        self.key
    }

    pub fn estimated_budget(&self) -> u32 {
        self.budget
    }

    pub(crate) fn candidate(&self, assessment: &Assessment<'_>) -> Option<ProgramCandidate> {
        if !(self.eligible)(assessment) {
            return None;
        }

        Some(ProgramCandidate {
            program_key: self.key,
            display_label: self.display_label(assessment),
            score: self.score(assessment),
            estimated_budget: self.budget,
            reasons: (self.reasons)(assessment),
        })
    }

    fn display_label(&self, assessment: &Assessment<'_>) -> String {
        match self.label {
            Label::Fixed(label) => label.to_string(),
            Label::WithProvince(label) => {
                format!("{label}: {}", assessment.profile.target_province.trim())
            }
        }
    }

    fn score(&self, assessment: &Assessment<'_>) -> u16 {
        let policy = assessment.policy;
        let has_offer = assessment.profile.has_validated_job_offer;

        match self.scoring {
            Scoring::Composite => assessment.composite,
            Scoring::CompositePlusOfferBonus if has_offer => assessment
                .composite
                .saturating_add(policy.nominee_offer_bonus)
                .min(MAX_COMPOSITE_SCORE),
            Scoring::CompositePlusOfferBonus => assessment.composite,
            Scoring::ScaledComposite => {
                let scaled = (f64::from(assessment.composite) * policy.quebec_scale).round();
                scaled.clamp(0.0, f64::from(MAX_COMPOSITE_SCORE)) as u16
            }
            Scoring::OfferSignal if has_offer => policy.work_signal_with_offer,
            Scoring::OfferSignal => policy.work_signal_without_offer,
            Scoring::Informational => 0,
        }
    }
}

pub static PROGRAMS: [ProgramDefinition; 9] = [
    ProgramDefinition {
        key: ProgramKey::FederalSkilledWorker,
        label: Label::Fixed("Express Entry: Federal Skilled Worker (FSW)"),
        budget: 3_500,
        scoring: Scoring::Composite,
        eligible: skilled_worker_eligible,
        reasons: skilled_worker_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::CanadianExperience,
        label: Label::Fixed("Express Entry: Canadian Experience Class (CEC)"),
        budget: 3_000,
        scoring: Scoring::Composite,
        eligible: canadian_experience_eligible,
        reasons: canadian_experience_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::FederalSkilledTrades,
        label: Label::Fixed("Express Entry: Federal Skilled Trades (FST)"),
        budget: 3_500,
        scoring: Scoring::Composite,
        eligible: skilled_trades_eligible,
        reasons: skilled_trades_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::ProvincialNominee,
        label: Label::WithProvince("Provincial Nominee Program (PNP)"),
        budget: 4_500,
        scoring: Scoring::CompositePlusOfferBonus,
        eligible: provincial_nominee_eligible,
        reasons: provincial_nominee_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::Quebec,
        label: Label::Fixed("Quebec: Arrima / CSQ (estimate)"),
        budget: 5_000,
        scoring: Scoring::ScaledComposite,
        eligible: quebec_eligible,
        reasons: quebec_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::FamilySponsorship,
        label: Label::Fixed("Family sponsorship (guidance)"),
        budget: 1_200,
        scoring: Scoring::Informational,
        eligible: family_eligible,
        reasons: family_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::StudyPermit,
        label: Label::Fixed("Study permit (indicative)"),
        budget: 8_000,
        scoring: Scoring::Informational,
        eligible: always_eligible,
        reasons: study_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::TemporaryWork,
        label: Label::Fixed("Temporary work (LMIA / International Mobility)"),
        budget: 2_500,
        scoring: Scoring::OfferSignal,
        eligible: always_eligible,
        reasons: temporary_work_reasons,
    },
    ProgramDefinition {
        key: ProgramKey::Visitor,
        label: Label::Fixed("Visitor visa (indicative)"),
        budget: 200,
        scoring: Scoring::Informational,
        eligible: always_eligible,
        reasons: visitor_reasons,
    },
];

fn skilled_worker_eligible(assessment: &Assessment<'_>) -> bool {
    let profile = assessment.profile;
    assessment.proficiency.all_at_least(7)
        && profile.foreign_experience() >= 1.0
        && profile.available_funds() >= assessment.policy.funds_minimum
}

fn canadian_experience_eligible(assessment: &Assessment<'_>) -> bool {
    assessment.profile.canadian_experience() >= 1.0
}

fn skilled_trades_eligible(assessment: &Assessment<'_>) -> bool {
    let levels = assessment.proficiency;
    let profile = assessment.profile;
    let language = levels.listening >= 5
        && levels.speaking >= 5
        && levels.reading >= 4
        && levels.writing >= 4;
    let experience = profile.foreign_experience() >= 2.0 || profile.canadian_experience() >= 1.0;
    language && experience
}

fn provincial_nominee_eligible(assessment: &Assessment<'_>) -> bool {
    let profile = assessment.profile;
    let policy = assessment.policy;
    policy.is_nominee_province(&profile.target_province)
        && (profile.has_validated_job_offer || policy.nominee_age_window(profile.age))
}

fn quebec_eligible(assessment: &Assessment<'_>) -> bool {
    is_quebec(&assessment.profile.target_province)
}

fn family_eligible(assessment: &Assessment<'_>) -> bool {
    assessment.profile.sponsorship_relation.is_declared()
}

fn always_eligible(_: &Assessment<'_>) -> bool {
    true
}

fn skilled_worker_reasons(_: &Assessment<'_>) -> Vec<String> {
    reasons(&[
        "Primary language at CLB 7 or higher in every skill",
        "At least 1 year of skilled work experience",
        "Available funds meet the estimated minimum",
    ])
}

fn canadian_experience_reasons(_: &Assessment<'_>) -> Vec<String> {
    reasons(&[
        "Canadian work experience (1 year or more)",
        "Fast track depending on occupation and language",
    ])
}

fn skilled_trades_reasons(_: &Assessment<'_>) -> Vec<String> {
    reasons(&[
        "Skilled trades profile",
        "Reduced language requirements (CLB 5 to 7)",
    ])
}

fn provincial_nominee_reasons(assessment: &Assessment<'_>) -> Vec<String> {
    let second = if assessment.profile.has_validated_job_offer {
        "Validated job offer"
    } else {
        "Profile potentially attractive to the province"
    };
    reasons(&["Target province runs nominee streams", second])
}

fn quebec_reasons(_: &Assessment<'_>) -> Vec<String> {
    reasons(&[
        "Target province: Quebec",
        "Province-specific grid (French, field of study, age)",
    ])
}

fn family_reasons(assessment: &Assessment<'_>) -> Vec<String> {
    vec![
        format!(
            "Family relation: {}",
            assessment.profile.sponsorship_relation.label()
        ),
        "Sponsor income and undertaking to be verified".to_string(),
    ]
}

fn study_reasons(_: &Assessment<'_>) -> Vec<String> {
    reasons(&[
        "Letter of acceptance (and CAQ for Quebec) required",
        "Proof of funds and a coherent study plan",
    ])
}

fn temporary_work_reasons(assessment: &Assessment<'_>) -> Vec<String> {
    if assessment.profile.has_validated_job_offer {
        reasons(&["Job offer present"])
    } else {
        reasons(&["May require an LMIA or an exemption"])
    }
}

fn visitor_reasons(_: &Assessment<'_>) -> Vec<String> {
    reasons(&["Purpose of travel and home-country ties to demonstrate"])
}

fn reasons(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
