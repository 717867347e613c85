//! Aggregations over a loaded [`SurveyDataset`](crate::survey::SurveyDataset).
//!
//! Both analyzers make a single pass over the records and never mutate them.

mod department;
mod report;
mod valued;

pub use department::{DepartmentBreakdown, DepartmentSatisfactionAnalyzer, DepartmentStat};
pub use report::{DepartmentReportEntry, EngagementReport, ValuedReportEntry};
pub use valued::{ValuedNoSuggestionsSummary, ValuedWithoutSuggestionsAnalyzer};

/// `100 * part / whole` rounded half-up to two decimals.
///
/// The rounding happens on the exact ratio in integer hundredths, so a value such
/// as `1.005` rounds to `1.01` instead of falling victim to its binary
/// representation. `whole` must be non-zero.
pub(crate) fn rounded_percentage(part: usize, whole: usize) -> f64 {
    debug_assert!(whole > 0, "percentage of an empty group");
    let part = part as u128;
    let whole = whole as u128;
    let hundredths = (20_000 * part + whole) / (2 * whole);
    hundredths as f64 / 100.0
}

/// Unrounded `100 * part / whole`, or `0.0` when `whole` is zero.
pub(crate) fn raw_percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_on_exact_ratio() {
        assert_eq!(rounded_percentage(201, 20_000), 1.01);
        assert_eq!(rounded_percentage(1, 3), 33.33);
        assert_eq!(rounded_percentage(2, 3), 66.67);
        assert_eq!(rounded_percentage(1, 8), 12.5);
        assert_eq!(rounded_percentage(0, 5), 0.0);
        assert_eq!(rounded_percentage(7, 7), 100.0);
    }

    #[test]
    fn raw_percentage_handles_empty_whole() {
        assert_eq!(raw_percentage(0, 0), 0.0);
        assert_eq!(raw_percentage(1, 2), 50.0);
    }
}
