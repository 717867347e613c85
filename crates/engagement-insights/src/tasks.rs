//! Loader → analyzer → writer pipelines, one per batch task.

use crate::analysis::{
    DepartmentSatisfactionAnalyzer, DepartmentStat, EngagementReport, ValuedNoSuggestionsSummary,
    ValuedWithoutSuggestionsAnalyzer,
};
use crate::error::AppError;
use crate::output::{self, WriteError};
use crate::session::TaskSession;
use crate::survey::SurveyLoader;
use std::path::PathBuf;
use tracing::error;

pub const DEPARTMENT_TASK: &str = "department_satisfaction";
pub const VALUED_TASK: &str = "valued_without_suggestions";
pub const REPORT_TASK: &str = "engagement_report";

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentTaskOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuedTaskOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTaskOptions {
    pub input: PathBuf,
    pub threshold: f64,
}

/// Outcome of the valued-without-suggestions task. The write failure, if any,
/// has already been reported to the operator.
#[derive(Debug)]
pub struct ValuedTaskOutcome {
    pub summary: ValuedNoSuggestionsSummary,
    pub write_error: Option<WriteError>,
}

/// Runs the department satisfaction task. Load and write failures are fatal.
pub fn run_department_task(
    options: &DepartmentTaskOptions,
) -> Result<Vec<DepartmentStat>, AppError> {
    let session = TaskSession::start(DEPARTMENT_TASK, options.clone());

    let stats = session.in_scope(|options| -> Result<_, AppError> {
        let dataset = SurveyLoader::from_path(&options.input)?;
        let stats = DepartmentSatisfactionAnalyzer::new(options.threshold).analyze(&dataset);
        output::write_department_stats(&options.output, &stats)?;
        Ok(stats)
    })?;

    session.finish();
    Ok(stats)
}

/// Runs the valued-without-suggestions task. Load failures are fatal; a write
/// failure is logged and the task still completes.
pub fn run_valued_task(options: &ValuedTaskOptions) -> Result<ValuedTaskOutcome, AppError> {
    let session = TaskSession::start(VALUED_TASK, options.clone());

    let outcome = session.in_scope(|options| -> Result<_, AppError> {
        let dataset = SurveyLoader::from_path(&options.input)?;
        let summary = ValuedWithoutSuggestionsAnalyzer::new().analyze(Some(&dataset));

        let write_error = match output::write_valued_summary(&options.output, &summary) {
            Ok(()) => None,
            Err(err) => {
                error!(error = %err, "error writing output");
                Some(err)
            }
        };

        Ok(ValuedTaskOutcome {
            summary,
            write_error,
        })
    })?;

    session.finish();
    Ok(outcome)
}

/// Loads the survey once and builds the combined report. Nothing is written.
pub fn run_report_task(options: &ReportTaskOptions) -> Result<EngagementReport, AppError> {
    let session = TaskSession::start(REPORT_TASK, options.clone());

    let report = session.in_scope(|options| -> Result<_, AppError> {
        let dataset = SurveyLoader::from_path(&options.input)?;
        Ok(EngagementReport::build(&dataset, options.threshold))
    })?;

    session.finish();
    Ok(report)
}
