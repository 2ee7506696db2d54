use serde::{Deserialize, Serialize};

const NOMINEE_PROVINCES: [&str; 11] = [
    "Alberta",
    "British Columbia",
    "Manitoba",
    "New Brunswick",
    "Newfoundland and Labrador",
    "Nova Scotia",
    "Ontario",
    "Prince Edward Island",
    "Saskatchewan",
    "Yukon",
    "Northwest Territories",
];

/// Policy constants consumed by the program predicates and scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    /// Settlement funds required by the federal skilled-worker class.
    pub funds_minimum: f64,
    /// Added to the composite score when a nominee candidate holds a validated offer.
    pub nominee_offer_bonus: u16,
    pub nominee_min_age: u32,
    pub nominee_max_age: u32,
    pub nominee_provinces: Vec<String>,
    /// Quebec runs its own grid; the composite is scaled down to approximate it.
    pub quebec_scale: f64,
    pub work_signal_with_offer: u16,
    pub work_signal_without_offer: u16,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            funds_minimum: 13_500.0,
            nominee_offer_bonus: 50,
            nominee_min_age: 21,
            nominee_max_age: 44,
            nominee_provinces: NOMINEE_PROVINCES
                .iter()
                .map(|province| province.to_string())
                .collect(),
            quebec_scale: 0.8,
            work_signal_with_offer: 70,
            work_signal_without_offer: 30,
        }
    }
}

impl EligibilityPolicy {
    pub fn is_nominee_province(&self, province: &str) -> bool {
        let province = province.trim();
        !province.is_empty()
            && self
                .nominee_provinces
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(province))
    }

    pub fn nominee_age_window(&self, age: u32) -> bool {
        (self.nominee_min_age..=self.nominee_max_age).contains(&age)
    }
}

/// Matches "Québec" and "Quebec" in any case, including longer labels such as
/// "Province of Quebec".
pub fn is_quebec(province: &str) -> bool {
    let lowered = province.to_lowercase();
    lowered.contains("québec") || lowered.contains("quebec")
}
