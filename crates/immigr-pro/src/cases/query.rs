use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{CaseRecord, CaseStatus};
use crate::config::CasesConfig;

/// Field the admin listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Status,
    Score,
    BudgetEstimate,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Admin listing parameters, as received on the query string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseQuery {
    pub q: String,
    /// `None` lists every status (`all` on the wire).
    #[serde(deserialize_with = "deserialize_status_filter")]
    pub status: Option<CaseStatus>,
    pub sort: SortKey,
    pub dir: SortDirection,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePage {
    pub items: Vec<CaseRecord>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

impl CaseQuery {
    pub fn page_number(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn effective_page_size(&self, limits: &CasesConfig) -> usize {
        self.page_size
            .unwrap_or(limits.default_page_size)
            .clamp(1, limits.max_page_size.max(1))
    }

    pub fn matches(&self, record: &CaseRecord) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }

        let needle = self.q.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            record.program_suggestion.as_deref().unwrap_or_default(),
            record.applicant.full_name.as_str(),
            record.applicant.email.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filter, sort and slice the records into the requested page.
    pub fn paginate(&self, records: Vec<CaseRecord>, limits: &CasesConfig) -> CasePage {
        let mut matching: Vec<CaseRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();
        matching.sort_by(|left, right| self.compare(left, right));

        let total = matching.len();
        let page = self.page_number();
        let page_size = self.effective_page_size(limits);
        let page_count = total.div_ceil(page_size).max(1);

        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        CasePage {
            items,
            total,
            page,
            page_size,
            page_count,
        }
    }

    fn compare(&self, left: &CaseRecord, right: &CaseRecord) -> Ordering {
        let primary = match self.sort {
            SortKey::CreatedAt => left.created_at.cmp(&right.created_at),
            SortKey::UpdatedAt => left.updated_at.cmp(&right.updated_at),
            SortKey::Status => left.status.cmp(&right.status),
            SortKey::Score => left.score.cmp(&right.score),
            SortKey::BudgetEstimate => left.budget_estimate.cmp(&right.budget_estimate),
            SortKey::Name => display_name(left).cmp(&display_name(right)),
        };
        let primary = match self.dir {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };

        // Newest first, then id, so equal keys list deterministically.
        primary
            .then_with(|| right.created_at.cmp(&left.created_at))
            .then_with(|| left.id.cmp(&right.id))
    }
}

fn display_name(record: &CaseRecord) -> String {
    let name = record.applicant.full_name.trim();
    if name.is_empty() {
        record.applicant.email.to_lowercase()
    } else {
        name.to_lowercase()
    }
}

fn deserialize_status_filter<'de, D>(deserializer: D) -> Result<Option<CaseStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => CaseStatus::from_label(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown case status '{value}'"))),
    }
}
