use serde::Serialize;
use std::collections::BTreeSet;

/// Self-reported engagement bucket. Matching is exact and case-sensitive;
/// anything outside the three known labels is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
    Other(String),
}

impl EngagementLevel {
    pub fn parse(value: &str) -> Self {
        match value {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Other(value) => value,
        }
    }
}

impl Serialize for EngagementLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// One row of the survey export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    pub employee_id: i64,
    pub department: String,
    pub job_title: String,
    pub satisfaction_rating: i32,
    pub engagement_level: EngagementLevel,
    pub reports_concerns: bool,
    pub provided_suggestions: bool,
}

impl EmployeeRecord {
    /// Rated above four and reports high engagement.
    pub fn is_highly_satisfied_and_engaged(&self) -> bool {
        self.satisfaction_rating > 4 && self.engagement_level == EngagementLevel::High
    }

    /// Rated four or higher.
    pub fn feels_valued(&self) -> bool {
        self.satisfaction_rating >= 4
    }
}

/// Read-only collection of survey rows produced by the loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyDataset {
    records: Vec<EmployeeRecord>,
}

impl SurveyDataset {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn departments(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .map(|record| record.department.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: i32, engagement: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: 1,
            department: "Sales".to_string(),
            job_title: "Associate".to_string(),
            satisfaction_rating: rating,
            engagement_level: EngagementLevel::parse(engagement),
            reports_concerns: false,
            provided_suggestions: true,
        }
    }

    #[test]
    fn engagement_level_matching_is_case_sensitive() {
        assert_eq!(EngagementLevel::parse("High"), EngagementLevel::High);
        assert_eq!(
            EngagementLevel::parse("high"),
            EngagementLevel::Other("high".to_string())
        );
        assert_eq!(EngagementLevel::parse("high").label(), "high");
    }

    #[test]
    fn predicates_follow_rating_boundaries() {
        assert!(record(5, "High").is_highly_satisfied_and_engaged());
        assert!(!record(4, "High").is_highly_satisfied_and_engaged());
        assert!(!record(5, "Medium").is_highly_satisfied_and_engaged());
        assert!(record(4, "Low").feels_valued());
        assert!(!record(3, "High").feels_valued());
    }

    #[test]
    fn departments_are_distinct_and_sorted() {
        let mut finance = record(3, "Low");
        finance.department = "Finance".to_string();
        let dataset = SurveyDataset::new(vec![record(5, "High"), finance, record(2, "Low")]);

        let departments: Vec<_> = dataset.departments().into_iter().collect();
        assert_eq!(departments, vec!["Finance", "Sales"]);
        assert_eq!(dataset.len(), 3);
    }
}
