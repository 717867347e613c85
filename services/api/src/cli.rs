use crate::report::{run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use engagement_insights::config::{parse_threshold, AnalysisConfig, AppConfig};
use engagement_insights::error::AppError;
use engagement_insights::tasks::{
    run_department_task, run_valued_task, DepartmentTaskOptions, ValuedTaskOptions,
};
use engagement_insights::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "engagement-insights",
    about = "Analyze employee engagement survey exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run both batch tasks with configured paths (default command)
    Run(InputArgs),
    /// Write departments with a high share of satisfied, engaged employees to CSV
    Departments(DepartmentsArgs),
    /// Write the count and share of valued employees without suggestions to a text file
    Valued(ValuedArgs),
    /// Print both analyses to stdout without writing files
    Report(ReportArgs),
    /// Start the HTTP service
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct InputArgs {
    /// Survey CSV export (defaults to ENGAGEMENT_INPUT_PATH)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DepartmentsArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Destination CSV (defaults to ENGAGEMENT_DEPARTMENTS_OUTPUT)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Percentage a department must exceed (defaults to ENGAGEMENT_DEPARTMENT_THRESHOLD)
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,
}

#[derive(Args, Debug)]
struct ValuedArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Destination text file (defaults to ENGAGEMENT_VALUED_OUTPUT)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(InputArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Run(args) => run_all(args, &config.analysis),
        Command::Departments(args) => run_departments(args, &config.analysis),
        Command::Valued(args) => run_valued(args, &config.analysis),
        Command::Report(args) => run_report(args, &config.analysis),
        Command::Serve(args) => server::run(args, config).await,
    }
}

fn department_options(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    threshold: Option<f64>,
    analysis: &AnalysisConfig,
) -> DepartmentTaskOptions {
    DepartmentTaskOptions {
        input: input.unwrap_or_else(|| analysis.input_path.clone()),
        output: output.unwrap_or_else(|| analysis.departments_output.clone()),
        threshold: threshold.unwrap_or(analysis.department_threshold),
    }
}

fn valued_options(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    analysis: &AnalysisConfig,
) -> ValuedTaskOptions {
    ValuedTaskOptions {
        input: input.unwrap_or_else(|| analysis.input_path.clone()),
        output: output.unwrap_or_else(|| analysis.valued_output.clone()),
    }
}

fn run_all(args: InputArgs, analysis: &AnalysisConfig) -> Result<(), AppError> {
    let departments = department_options(args.input.clone(), None, None, analysis);
    let stats = run_department_task(&departments)?;
    info!(departments = stats.len(), "department satisfaction task complete");

    let valued = valued_options(args.input, None, analysis);
    let outcome = run_valued_task(&valued)?;
    info!(count = outcome.summary.count, "valued without suggestions task complete");

    Ok(())
}

fn run_departments(args: DepartmentsArgs, analysis: &AnalysisConfig) -> Result<(), AppError> {
    let DepartmentsArgs {
        input,
        output,
        threshold,
    } = args;

    let options = department_options(input.input, output, threshold, analysis);
    let stats = run_department_task(&options)?;

    println!(
        "{} department(s) above {:.2}% written to {}",
        stats.len(),
        options.threshold,
        options.output.display()
    );
    Ok(())
}

fn run_valued(args: ValuedArgs, analysis: &AnalysisConfig) -> Result<(), AppError> {
    let options = valued_options(args.input.input, args.output, analysis);
    let outcome = run_valued_task(&options)?;

    match outcome.write_error {
        None => println!("Results written to {}", options.output.display()),
        Some(err) => eprintln!("Error writing output: {err}"),
    }
    Ok(())
}
