use super::record::{EmployeeRecord, EngagementLevel, SurveyDataset};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Column order every survey export must follow.
pub const SURVEY_HEADERS: [&str; 7] = [
    "EmployeeID",
    "Department",
    "JobTitle",
    "SatisfactionRating",
    "EngagementLevel",
    "ReportsConcerns",
    "ProvidedSuggestions",
];

/// Failures raised while turning a survey export into a [`SurveyDataset`].
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to open survey export {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid survey CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("survey header mismatch: expected [{expected}], found [{found}]")]
    Schema { expected: String, found: String },
    #[error("line {line}: column {column} has invalid value '{value}': {reason}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("line {line}: duplicate EmployeeID {employee_id} (first seen on line {first_line})")]
    DuplicateEmployee {
        line: u64,
        employee_id: i64,
        first_line: u64,
    },
}

pub struct SurveyLoader;

impl SurveyLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SurveyDataset, DataLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            departments = dataset.departments().len(),
            "survey export loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<SurveyDataset, DataLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = validate_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        let mut first_seen: HashMap<i64, u64> = HashMap::new();
        let mut out_of_range = 0usize;

        for result in csv_reader.records() {
            let raw = result?;
            let line = raw.position().map(|pos| pos.line()).unwrap_or_default();
            let row: SurveyRow = raw.deserialize(Some(&headers))?;
            let record = row.into_record(line)?;

            if let Some(&first_line) = first_seen.get(&record.employee_id) {
                return Err(DataLoadError::DuplicateEmployee {
                    line,
                    employee_id: record.employee_id,
                    first_line,
                });
            }
            first_seen.insert(record.employee_id, line);

            if !(1..=5).contains(&record.satisfaction_rating) {
                out_of_range += 1;
                debug!(
                    line,
                    rating = record.satisfaction_rating,
                    "satisfaction rating outside 1-5"
                );
            }

            records.push(record);
        }

        if out_of_range > 0 {
            warn!(
                rows = out_of_range,
                "survey rows carry satisfaction ratings outside the expected 1-5 range"
            );
        }

        Ok(SurveyDataset::new(records))
    }
}

fn validate_headers(headers: &csv::StringRecord) -> Result<csv::StringRecord, DataLoadError> {
    let found: Vec<String> = headers
        .iter()
        .map(|header| header.replace('\u{feff}', ""))
        .collect();

    if found.iter().map(String::as_str).eq(SURVEY_HEADERS) {
        return Ok(csv::StringRecord::from(found));
    }

    Err(DataLoadError::Schema {
        expected: SURVEY_HEADERS.join(","),
        found: found.join(","),
    })
}

#[derive(Debug, Deserialize)]
struct SurveyRow {
    #[serde(rename = "EmployeeID")]
    employee_id: i64,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "JobTitle")]
    job_title: String,
    #[serde(rename = "SatisfactionRating")]
    satisfaction_rating: i32,
    #[serde(rename = "EngagementLevel")]
    engagement_level: String,
    #[serde(rename = "ReportsConcerns", deserialize_with = "flexible_bool")]
    reports_concerns: bool,
    #[serde(rename = "ProvidedSuggestions", deserialize_with = "flexible_bool")]
    provided_suggestions: bool,
}

impl SurveyRow {
    fn into_record(self, line: u64) -> Result<EmployeeRecord, DataLoadError> {
        if self.department.is_empty() {
            return Err(DataLoadError::InvalidField {
                line,
                column: "Department",
                value: self.department,
                reason: "department must not be empty",
            });
        }

        if self.engagement_level.is_empty() {
            return Err(DataLoadError::InvalidField {
                line,
                column: "EngagementLevel",
                value: self.engagement_level,
                reason: "engagement level must not be empty",
            });
        }

        Ok(EmployeeRecord {
            employee_id: self.employee_id,
            department: self.department,
            job_title: self.job_title,
            satisfaction_rating: self.satisfaction_rating,
            engagement_level: EngagementLevel::parse(&self.engagement_level),
            reports_concerns: self.reports_concerns,
            provided_suggestions: self.provided_suggestions,
        })
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected true or false, found '{raw}'"
        )))
    }
}
