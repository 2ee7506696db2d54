use serde::Serialize;

use super::domain::CaseRecord;

const HEADERS: [&str; 9] = [
    "id",
    "fullName",
    "email",
    "status",
    "program",
    "budget",
    "score",
    "createdAt",
    "updatedAt",
];

#[derive(Debug, Serialize)]
struct CaseRow<'a> {
    id: &'a str,
    #[serde(rename = "fullName")]
    full_name: &'a str,
    email: &'a str,
    status: &'static str,
    program: &'a str,
    budget: Option<u32>,
    score: Option<u16>,
    #[serde(rename = "createdAt")]
    created_at: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

impl<'a> From<&'a CaseRecord> for CaseRow<'a> {
    fn from(record: &'a CaseRecord) -> Self {
        Self {
            id: record.id.as_str(),
            full_name: &record.applicant.full_name,
            email: &record.applicant.email,
            status: record.status.label(),
            program: record.program_suggestion.as_deref().unwrap_or_default(),
            budget: record.budget_estimate,
            score: record.score,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// Render records as CSV with a header row, one line per case.
pub(crate) fn write_csv(records: &[CaseRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    // Serialized rows emit the header themselves; an empty page still gets one.
    if records.is_empty() {
        writer.write_record(HEADERS)?;
    }
    for record in records {
        writer.serialize(CaseRow::from(record))?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
