use super::rounded_percentage;
use crate::survey::SurveyDataset;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A department whose share of highly satisfied, highly engaged employees
/// exceeded the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStat {
    pub department: String,
    pub high_satisfaction_percentage: f64,
}

/// Per-department counts before the threshold is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentBreakdown {
    pub department: String,
    pub total: usize,
    pub qualifying: usize,
    pub high_satisfaction_percentage: f64,
}

impl DepartmentBreakdown {
    fn to_stat(&self) -> DepartmentStat {
        DepartmentStat {
            department: self.department.clone(),
            high_satisfaction_percentage: self.high_satisfaction_percentage,
        }
    }
}

#[derive(Debug, Default)]
struct DepartmentTally {
    total: usize,
    qualifying: usize,
}

/// Finds departments where employees rated satisfaction above 4 and report high
/// engagement more often than `threshold` percent of the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartmentSatisfactionAnalyzer {
    threshold: f64,
}

impl DepartmentSatisfactionAnalyzer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Every department in the dataset, sorted by name. Departments without a
    /// single qualifying employee are kept with a count of zero.
    pub fn breakdown(&self, dataset: &SurveyDataset) -> Vec<DepartmentBreakdown> {
        let mut tallies: BTreeMap<&str, DepartmentTally> = BTreeMap::new();

        for record in dataset.records() {
            let tally = tallies.entry(record.department.as_str()).or_default();
            tally.total += 1;
            if record.is_highly_satisfied_and_engaged() {
                tally.qualifying += 1;
            }
        }

        tallies
            .into_iter()
            .map(|(department, tally)| DepartmentBreakdown {
                department: department.to_string(),
                total: tally.total,
                qualifying: tally.qualifying,
                high_satisfaction_percentage: rounded_percentage(tally.qualifying, tally.total),
            })
            .collect()
    }

    /// Departments whose rounded percentage is strictly above the threshold.
    pub fn analyze(&self, dataset: &SurveyDataset) -> Vec<DepartmentStat> {
        let breakdown = self.breakdown(dataset);
        let stats: Vec<DepartmentStat> = breakdown
            .iter()
            .filter(|entry| self.qualifies(entry))
            .map(DepartmentBreakdown::to_stat)
            .collect();

        debug!(
            departments = breakdown.len(),
            retained = stats.len(),
            threshold = self.threshold,
            "department satisfaction computed"
        );

        stats
    }

    pub fn qualifies(&self, entry: &DepartmentBreakdown) -> bool {
        entry.high_satisfaction_percentage > self.threshold
    }
}
