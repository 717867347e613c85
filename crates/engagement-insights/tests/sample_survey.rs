use engagement_insights::analysis::{
    DepartmentSatisfactionAnalyzer, EngagementReport, ValuedWithoutSuggestionsAnalyzer,
};
use engagement_insights::error::AppError;
use engagement_insights::survey::SurveyLoader;
use engagement_insights::tasks::{run_report_task, ReportTaskOptions};
use tempfile::TempDir;

const SAMPLE: &str = include_str!("fixtures/employee_data.csv");

#[test]
fn sample_export_loads_every_row() {
    let dataset = SurveyLoader::from_reader(SAMPLE.as_bytes()).expect("sample loads");
    assert_eq!(dataset.len(), 20);
    let departments: Vec<_> = dataset.departments().into_iter().collect();
    assert_eq!(departments, vec!["Finance", "HR", "IT", "Marketing", "Sales"]);
}

#[test]
fn sample_department_results_under_both_thresholds() {
    let dataset = SurveyLoader::from_reader(SAMPLE.as_bytes()).expect("sample loads");

    let stats = DepartmentSatisfactionAnalyzer::new(50.0).analyze(&dataset);
    let reported: Vec<_> = stats
        .iter()
        .map(|stat| (stat.department.as_str(), stat.high_satisfaction_percentage))
        .collect();
    assert_eq!(reported, vec![("HR", 66.67), ("Sales", 75.0)]);

    let lenient = DepartmentSatisfactionAnalyzer::new(5.0).analyze(&dataset);
    let reported: Vec<_> = lenient
        .iter()
        .map(|stat| (stat.department.as_str(), stat.high_satisfaction_percentage))
        .collect();
    assert_eq!(
        reported,
        vec![("Finance", 25.0), ("HR", 66.67), ("IT", 40.0), ("Sales", 75.0)]
    );
}

#[test]
fn sample_valued_without_suggestions() {
    let dataset = SurveyLoader::from_reader(SAMPLE.as_bytes()).expect("sample loads");
    let summary = ValuedWithoutSuggestionsAnalyzer::new().analyze(Some(&dataset));

    assert_eq!(summary.valued_total, 14);
    assert_eq!(summary.count, 8);
    assert_eq!(summary.proportion(), "57.14");
}

#[test]
fn report_flags_match_analyzer_output() {
    let dataset = SurveyLoader::from_reader(SAMPLE.as_bytes()).expect("sample loads");
    let report = EngagementReport::build(&dataset, 50.0);

    let flagged: Vec<_> = report
        .reported_departments()
        .map(|entry| entry.department.as_str())
        .collect();
    assert_eq!(flagged, vec!["HR", "Sales"]);
    assert_eq!(report.employees, 20);
}

#[test]
fn report_task_reads_input_from_its_options() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("employee_data.csv");
    std::fs::write(&input, SAMPLE).expect("input written");

    let report = run_report_task(&ReportTaskOptions {
        input,
        threshold: 5.0,
    })
    .expect("report builds");

    assert_eq!(report.department_threshold, 5.0);
    assert_eq!(report.reported_departments().count(), 4);
    assert_eq!(report.valued_without_suggestions.proportion, "57.14");
    assert_eq!(std::fs::read_dir(dir.path()).expect("list dir").count(), 1);
}

#[test]
fn report_task_fails_on_missing_input() {
    let dir = TempDir::new().expect("temp dir");
    let error = run_report_task(&ReportTaskOptions {
        input: dir.path().join("absent.csv"),
        threshold: 50.0,
    })
    .expect_err("missing input");
    assert!(matches!(error, AppError::Load(_)));
}
