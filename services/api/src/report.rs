use crate::cli::InputArgs;
use clap::Args;
use engagement_insights::analysis::EngagementReport;
use engagement_insights::config::{parse_threshold, AnalysisConfig};
use engagement_insights::error::AppError;
use engagement_insights::output::render_valued_summary;
use engagement_insights::tasks::{run_report_task, ReportTaskOptions};
use std::io::Write;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Percentage a department must exceed to be flagged
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// Emit JSON instead of the human readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs, analysis: &AnalysisConfig) -> Result<(), AppError> {
    let report = run_report_task(&ReportTaskOptions {
        input: args
            .input
            .input
            .unwrap_or_else(|| analysis.input_path.clone()),
        threshold: args.threshold.unwrap_or(analysis.department_threshold),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        writeln!(out, "{body}")?;
    } else {
        render_report(&mut out, &report)?;
    }

    Ok(())
}

fn render_report<W: Write>(out: &mut W, report: &EngagementReport) -> std::io::Result<()> {
    writeln!(out, "Employee engagement report")?;
    writeln!(out, "Employees surveyed: {}", report.employees)?;

    writeln!(
        out,
        "\nDepartments (threshold {:.2}%)",
        report.department_threshold
    )?;
    if report.departments.is_empty() {
        writeln!(out, "- none")?;
    }
    for entry in &report.departments {
        let marker = if entry.above_threshold { "*" } else { " " };
        writeln!(
            out,
            "{} {}: {}/{} highly satisfied and engaged ({:.2}%)",
            marker,
            entry.department,
            entry.qualifying,
            entry.total,
            entry.high_satisfaction_percentage
        )?;
    }

    let valued = &report.valued_without_suggestions;
    writeln!(out, "\nValued without suggestions")?;
    write!(out, "{}", render_valued_summary(&valued.summary()))?;
    writeln!(out, "Valued employees: {}", valued.valued_total)?;

    Ok(())
}
