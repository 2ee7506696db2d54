//! Conversion of raw language test results into proficiency levels.

use serde::{Deserialize, Serialize};

use super::domain::{LanguageInput, SkillScores};

/// Lowest and highest levels accepted on the direct-level scale.
const DIRECT_LEVEL_MIN: f64 = 1.0;
const DIRECT_LEVEL_MAX: f64 = 12.0;

/// Descending `(threshold, level)` pairs; the first threshold met wins.
type StepTable = &'static [(f64, u8)];

const GENERAL_LISTENING: StepTable = &[
    (8.5, 10),
    (8.0, 9),
    (7.5, 8),
    (6.0, 7),
    (5.5, 6),
    (5.0, 5),
    (4.5, 4),
];

const GENERAL_READING: StepTable = &[
    (8.0, 10),
    (7.0, 9),
    (6.5, 8),
    (6.0, 7),
    (5.0, 6),
    (4.0, 5),
    (3.5, 4),
];

// Speaking shares the writing breakpoints.
const GENERAL_WRITING: StepTable = &[
    (7.5, 10),
    (7.0, 9),
    (6.5, 8),
    (6.0, 7),
    (5.5, 6),
    (5.0, 5),
    (4.0, 4),
];

const SCALE_B: StepTable = &[
    (400.0, 10),
    (350.0, 9),
    (300.0, 8),
    (250.0, 7),
    (200.0, 6),
    (150.0, 5),
    (120.0, 4),
];

const SCALE_C: StepTable = &[
    (550.0, 10),
    (500.0, 9),
    (450.0, 8),
    (400.0, 7),
    (350.0, 6),
    (300.0, 5),
    (250.0, 4),
];

/// The four assessed language skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Listening,
    Speaking,
    Reading,
    Writing,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Listening,
        Skill::Speaking,
        Skill::Reading,
        Skill::Writing,
    ];

    fn general_table(self) -> StepTable {
        match self {
            Skill::Listening => GENERAL_LISTENING,
            Skill::Reading => GENERAL_READING,
            Skill::Speaking | Skill::Writing => GENERAL_WRITING,
        }
    }
}

/// Normalized level (0 to 12) per skill. Zero means below the lowest threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProficiencyLevels {
    pub listening: u8,
    pub speaking: u8,
    pub reading: u8,
    pub writing: u8,
}

impl ProficiencyLevels {
    pub const fn uniform(level: u8) -> Self {
        Self {
            listening: level,
            speaking: level,
            reading: level,
            writing: level,
        }
    }

    pub const fn get(&self, skill: Skill) -> u8 {
        match skill {
            Skill::Listening => self.listening,
            Skill::Speaking => self.speaking,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, u8)> + '_ {
        Skill::ALL.into_iter().map(move |skill| (skill, self.get(skill)))
    }

    pub fn all_at_least(&self, minimum: u8) -> bool {
        self.iter().all(|(_, level)| level >= minimum)
    }

    fn from_fn(mut level_for: impl FnMut(Skill) -> u8) -> Self {
        Self {
            listening: level_for(Skill::Listening),
            speaking: level_for(Skill::Speaking),
            reading: level_for(Skill::Reading),
            writing: level_for(Skill::Writing),
        }
    }
}

/// Derive one proficiency level per skill from the collected test results.
///
/// A lone overall band is run through every skill's general-test table, which assumes
/// uniform proficiency when granular results are missing.
pub fn normalize(input: &LanguageInput) -> ProficiencyLevels {
    match input {
        LanguageInput::Overall { overall } => {
            ProficiencyLevels::from_fn(|skill| general_level(skill, *overall))
        }
        LanguageInput::ScaleA(scores) => per_skill(scores, direct_level),
        LanguageInput::ScaleB(scores) => per_skill(scores, scale_b_level),
        LanguageInput::ScaleC(scores) => per_skill(scores, scale_c_level),
    }
}

pub fn general_level(skill: Skill, band: f64) -> u8 {
    step(skill.general_table(), band)
}

pub fn scale_b_level(score: f64) -> u8 {
    step(SCALE_B, score)
}

pub fn scale_c_level(score: f64) -> u8 {
    step(SCALE_C, score)
}

/// Direct levels are clamped into 1..=12 and truncated to whole levels.
pub fn direct_level(value: f64) -> u8 {
    if value.is_nan() {
        return DIRECT_LEVEL_MIN as u8;
    }
    value.clamp(DIRECT_LEVEL_MIN, DIRECT_LEVEL_MAX).trunc() as u8
}

fn per_skill(scores: &SkillScores, convert: fn(f64) -> u8) -> ProficiencyLevels {
    ProficiencyLevels::from_fn(|skill| {
        let raw = match skill {
            Skill::Listening => scores.listening,
            Skill::Speaking => scores.speaking,
            Skill::Reading => scores.reading,
            Skill::Writing => scores.writing,
        };
        convert(raw)
    })
}

fn step(table: StepTable, value: f64) -> u8 {
    table
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, level)| *level)
        .unwrap_or(0)
}
