use super::{
    DepartmentBreakdown, DepartmentSatisfactionAnalyzer, ValuedNoSuggestionsSummary,
    ValuedWithoutSuggestionsAnalyzer,
};
use crate::survey::SurveyDataset;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReportEntry {
    pub department: String,
    pub total: usize,
    pub qualifying: usize,
    pub high_satisfaction_percentage: f64,
    pub above_threshold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuedReportEntry {
    pub count: usize,
    pub valued_total: usize,
    pub percentage: f64,
    pub proportion: String,
}

impl From<ValuedNoSuggestionsSummary> for ValuedReportEntry {
    fn from(summary: ValuedNoSuggestionsSummary) -> Self {
        Self {
            count: summary.count,
            valued_total: summary.valued_total,
            percentage: summary.percentage,
            proportion: summary.proportion(),
        }
    }
}

impl ValuedReportEntry {
    pub fn summary(&self) -> ValuedNoSuggestionsSummary {
        ValuedNoSuggestionsSummary {
            count: self.count,
            valued_total: self.valued_total,
            percentage: self.percentage,
        }
    }
}

/// Both analyses side by side, without writing anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementReport {
    pub employees: usize,
    pub department_threshold: f64,
    pub departments: Vec<DepartmentReportEntry>,
    pub valued_without_suggestions: ValuedReportEntry,
}

impl EngagementReport {
    pub fn build(dataset: &SurveyDataset, department_threshold: f64) -> Self {
        let analyzer = DepartmentSatisfactionAnalyzer::new(department_threshold);
        let departments = analyzer
            .breakdown(dataset)
            .into_iter()
            .map(|entry| {
                let above_threshold = analyzer.qualifies(&entry);
                let DepartmentBreakdown {
                    department,
                    total,
                    qualifying,
                    high_satisfaction_percentage,
                } = entry;
                DepartmentReportEntry {
                    department,
                    total,
                    qualifying,
                    high_satisfaction_percentage,
                    above_threshold,
                }
            })
            .collect();

        let valued = ValuedWithoutSuggestionsAnalyzer::new().analyze(Some(dataset));

        Self {
            employees: dataset.len(),
            department_threshold: analyzer.threshold(),
            departments,
            valued_without_suggestions: valued.into(),
        }
    }

    pub fn reported_departments(&self) -> impl Iterator<Item = &DepartmentReportEntry> {
        self.departments.iter().filter(|entry| entry.above_threshold)
    }
}
