//! Bulk import of recorded cases from CSV.
//!
//! Expected headers: `case_id`, `age_weeks`, `feces_symptoms`,
//! `feces_consistency`, `chicken_symptoms`, plus the optional `feces_color`,
//! `feces_texture` and `observed_on` (YYYY-MM-DD). Symptom cells hold
//! `;`-separated tags.

use super::domain::{
    parse_tags, ChickenSymptom, EvidenceInput, FecesColor, FecesConsistency, FecesSymptom,
    FecesTexture,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_on: Option<NaiveDate>,
    pub evidence: EvidenceInput,
}

#[derive(Debug, thiserror::Error)]
pub enum CaseImportError {
    #[error("failed to read case file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid case CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("case row on line {line} is invalid: {detail}")]
    InvalidRow { line: u64, detail: String },
}

pub struct CaseImporter;

impl CaseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CaseRecord>, CaseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CaseRecord>, CaseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut cases = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(index as u64 + 2);
            let row: CaseRow = record.deserialize(Some(&headers))?;
            cases.push(row.into_case(line)?);
        }

        Ok(cases)
    }
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    case_id: String,
    age_weeks: f64,
    #[serde(default)]
    feces_symptoms: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    feces_consistency: Option<String>,
    #[serde(default)]
    chicken_symptoms: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    feces_color: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    feces_texture: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    observed_on: Option<String>,
}

impl CaseRow {
    fn into_case(self, line: u64) -> Result<CaseRecord, CaseImportError> {
        let invalid = |detail: String| CaseImportError::InvalidRow { line, detail };

        let case_id = self.case_id;
        if case_id.is_empty() {
            return Err(invalid("case_id is empty".to_string()));
        }
        if !self.age_weeks.is_finite() || self.age_weeks < 0.0 {
            return Err(invalid(format!(
                "age_weeks must be non-negative, got {}",
                self.age_weeks
            )));
        }

        let feces_consistency = match self.feces_consistency.as_deref() {
            None => FecesConsistency::Normal,
            Some(raw) => FecesConsistency::parse(raw)
                .ok_or_else(|| invalid(format!("unknown feces consistency '{raw}'")))?,
        };
        let feces_color = match self.feces_color.as_deref() {
            None => None,
            Some(raw) => Some(
                FecesColor::parse(raw)
                    .ok_or_else(|| invalid(format!("unknown feces color '{raw}'")))?,
            ),
        };
        let feces_texture = match self.feces_texture.as_deref() {
            None => None,
            Some(raw) => Some(
                FecesTexture::parse(raw)
                    .ok_or_else(|| invalid(format!("unknown feces texture '{raw}'")))?,
            ),
        };
        let observed_on = match self.observed_on.as_deref() {
            None => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| {
                invalid(format!("observed_on '{raw}' is not YYYY-MM-DD ({err})"))
            })?),
        };

        let (feces_symptoms, unknown_feces) =
            parse_tags(self.feces_symptoms.split(';'), FecesSymptom::parse);
        let (chicken_symptoms, unknown_chicken) =
            parse_tags(self.chicken_symptoms.split(';'), ChickenSymptom::parse);
        if !unknown_feces.is_empty() || !unknown_chicken.is_empty() {
            tracing::warn!(
                case_id = %case_id,
                line,
                ?unknown_feces,
                ?unknown_chicken,
                "ignoring unrecognized symptom tags"
            );
        }

        Ok(CaseRecord {
            case_id,
            observed_on,
            evidence: EvidenceInput {
                feces_symptoms,
                feces_consistency,
                chicken_symptoms,
                age_weeks: self.age_weeks,
                feces_color,
                feces_texture,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
