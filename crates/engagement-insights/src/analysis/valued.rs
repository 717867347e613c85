use super::raw_percentage;
use crate::survey::SurveyDataset;
use serde::Serialize;
use tracing::warn;

/// Employees who feel valued (rating of 4 or more) yet never provided a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ValuedNoSuggestionsSummary {
    pub count: usize,
    pub valued_total: usize,
    /// Share of `valued_total`, unrounded. Use [`Self::proportion`] for display.
    pub percentage: f64,
}

impl ValuedNoSuggestionsSummary {
    pub fn proportion(&self) -> String {
        format!("{:.2}", self.percentage)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValuedWithoutSuggestionsAnalyzer;

impl ValuedWithoutSuggestionsAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Returns `(0, 0.0)` instead of failing when no dataset is available.
    pub fn analyze(&self, dataset: Option<&SurveyDataset>) -> ValuedNoSuggestionsSummary {
        let Some(dataset) = dataset else {
            warn!("survey dataset unavailable; reporting zero valued employees");
            return ValuedNoSuggestionsSummary::default();
        };

        let (valued_total, count) = dataset
            .records()
            .iter()
            .filter(|record| record.feels_valued())
            .fold((0usize, 0usize), |(valued, silent), record| {
                let silent = silent + usize::from(!record.provided_suggestions);
                (valued + 1, silent)
            });

        ValuedNoSuggestionsSummary {
            count,
            valued_total,
            percentage: raw_percentage(count, valued_total),
        }
    }
}
