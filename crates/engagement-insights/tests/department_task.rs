use engagement_insights::analysis::{DepartmentSatisfactionAnalyzer, DepartmentStat};
use engagement_insights::error::AppError;
use engagement_insights::survey::{DataLoadError, SurveyLoader};
use engagement_insights::tasks::{run_department_task, DepartmentTaskOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str =
    "EmployeeID,Department,JobTitle,SatisfactionRating,EngagementLevel,ReportsConcerns,ProvidedSuggestions\n";

fn write_input(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("employee_data.csv");
    fs::write(&path, format!("{HEADER}{body}")).expect("input written");
    path
}

/// Department X: 4 of 4 qualify. Department Y: 3 of 10 qualify.
fn two_department_survey() -> String {
    let mut body = String::new();
    for id in 1..=4 {
        body.push_str(&format!("{id},X,Engineer,5,High,false,true\n"));
    }
    for offset in 0..10 {
        let id = 100 + offset;
        let (rating, engagement) = if offset < 3 { (5, "High") } else { (4, "Medium") };
        body.push_str(&format!("{id},Y,Analyst,{rating},{engagement},true,false\n"));
    }
    body
}

#[test]
fn business_threshold_reports_only_fully_engaged_department() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), &two_department_survey());
    let output = dir.path().join("out/task1.csv");

    let stats = run_department_task(&DepartmentTaskOptions {
        input,
        output: output.clone(),
        threshold: 50.0,
    })
    .expect("task succeeds");

    assert_eq!(
        stats,
        vec![DepartmentStat {
            department: "X".to_string(),
            high_satisfaction_percentage: 100.0,
        }]
    );
    assert_eq!(
        fs::read_to_string(output).expect("output exists"),
        "Department,high_satisfaction_percentage\nX,100.00\n"
    );
}

#[test]
fn literal_five_percent_threshold_also_reports_thirty_percent_department() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), &two_department_survey());
    let output = dir.path().join("task1.csv");

    run_department_task(&DepartmentTaskOptions {
        input,
        output: output.clone(),
        threshold: 5.0,
    })
    .expect("task succeeds");

    assert_eq!(
        fs::read_to_string(output).expect("output exists"),
        "Department,high_satisfaction_percentage\nX,100.00\nY,30.00\n"
    );
}

#[test]
fn header_only_input_writes_header_only_output() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "");
    let output = dir.path().join("task1.csv");

    let stats = run_department_task(&DepartmentTaskOptions {
        input,
        output: output.clone(),
        threshold: 50.0,
    })
    .expect("task succeeds");

    assert!(stats.is_empty());
    assert_eq!(
        fs::read_to_string(output).expect("output exists"),
        "Department,high_satisfaction_percentage\n"
    );
}

#[test]
fn rerunning_produces_identical_bytes() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), &two_department_survey());
    let output = dir.path().join("task1.csv");
    let options = DepartmentTaskOptions {
        input,
        output: output.clone(),
        threshold: 5.0,
    };

    run_department_task(&options).expect("first run");
    let first = fs::read(&output).expect("first output");
    run_department_task(&options).expect("second run");
    let second = fs::read(&output).expect("second output");

    assert_eq!(first, second);
}

#[test]
fn missing_input_aborts_without_output() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("task1.csv");

    let error = run_department_task(&DepartmentTaskOptions {
        input: dir.path().join("absent.csv"),
        output: output.clone(),
        threshold: 50.0,
    })
    .expect_err("missing input is fatal");

    assert!(matches!(error, AppError::Load(DataLoadError::Io { .. })));
    assert!(!output.exists());
}

#[test]
fn unwritable_destination_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), &two_department_survey());

    let error = run_department_task(&DepartmentTaskOptions {
        input,
        output: dir.path().to_path_buf(),
        threshold: 50.0,
    })
    .expect_err("directory is not a file");

    assert!(matches!(error, AppError::Write(_)));
}

#[test]
fn every_percentage_stays_within_bounds() {
    let mut body = String::new();
    let departments = ["Ops", "Finance", "Legal", "Support"];
    for id in 0..60 {
        let department = departments[id % departments.len()];
        let rating = (id % 5) + 1;
        let engagement = ["High", "Medium", "Low"][id % 3];
        body.push_str(&format!("{id},{department},Staff,{rating},{engagement},false,true\n"));
    }

    let dataset = SurveyLoader::from_reader(format!("{HEADER}{body}").as_bytes())
        .expect("survey loads");
    let analyzer = DepartmentSatisfactionAnalyzer::new(0.0);

    for entry in analyzer.breakdown(&dataset) {
        assert!(entry.total > 0);
        assert!(entry.qualifying <= entry.total);
        assert!((0.0..=100.0).contains(&entry.high_satisfaction_percentage));
    }
}
