//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn neuroeval() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("neuroeval").unwrap();
    cmd.env_remove("NEUROEVAL_OUTPUT_DIR");
    cmd
}

fn evaluate(values: [&str; 4]) -> Command {
    let mut cmd = neuroeval();
    cmd.arg("evaluate")
        .arg("--attendance")
        .arg(values[0])
        .arg("--assignment")
        .arg(values[1])
        .arg("--exam")
        .arg(values[2])
        .arg("--participation")
        .arg(values[3]);
    cmd
}

#[test]
fn evaluate_perfect_student() {
    evaluate(["100", "100", "100", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 89.44"))
        .stdout(predicate::str::contains("Category: Excellent"))
        .stdout(predicate::str::contains(
            "IF attendance IS good AND exam IS high THEN performance IS excellent",
        ));
}

#[test]
fn evaluate_json_output() {
    let output = evaluate(["75", "60", "65", "70"])
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["category"], "Good");
    assert!((json["score"].as_f64().unwrap() - 74.260274).abs() < 1e-5);
    assert_eq!(json["fuzzyInputs"]["exam"]["medium"], 0.75);
    assert_eq!(json["aggregated"]["good"], 0.5);
    assert_eq!(json["rules"].as_array().unwrap().len(), 8);
}

#[test]
fn evaluate_accepts_negative_values() {
    evaluate(["-10", "0", "0", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:"));
}

#[test]
fn evaluate_rejects_unknown_format() {
    evaluate(["50", "50", "50", "50"])
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn evaluate_records_history() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    for _ in 0..2 {
        evaluate(["70", "70", "70", "70"])
            .arg("--history")
            .arg(&history)
            .assert()
            .success();
    }
    evaluate(["80", "70", "70", "70"])
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 entries"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history).unwrap()).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["inputs"]["attendance"], 80.0);
}

#[test]
fn evaluate_rejects_non_finite_values() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    evaluate(["50", "50", "nan", "50"])
        .arg("--history")
        .arg(&history)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exam must be a finite number"));
    evaluate(["inf", "50", "50", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("attendance must be a finite number"));

    assert!(!history.exists());
}

#[test]
fn evaluate_applies_configured_history_limit() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    let config = dir.path().join("neuroeval.toml");
    std::fs::write(&config, "history_limit = 2\n").unwrap();

    for exam in ["10", "20", "30"] {
        evaluate(["70", "70", exam, "70"])
            .arg("--history")
            .arg(&history)
            .assert()
            .success();
    }

    evaluate(["70", "70", "40", "70"])
        .arg("--history")
        .arg(&history)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("Recorded in history (2 entries)"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history).unwrap()).unwrap();
    assert_eq!(json["limit"], 2);
    let exams: Vec<f64> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["inputs"]["exam"].as_f64().unwrap())
        .collect();
    assert_eq!(exams, [40.0, 30.0]);
}

#[test]
fn evaluate_repairs_zero_history_limit() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    std::fs::write(&history, r#"{"limit":0,"entries":[]}"#).unwrap();

    evaluate(["70", "70", "70", "70"])
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stderr(predicate::str::contains("Recorded in history (1 entries)"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history).unwrap()).unwrap();
    assert_eq!(json["entries"].as_array().unwrap().len(), 1);
}

#[test]
fn batch_rejects_non_finite_metrics() {
    let dir = TempDir::new().unwrap();
    let cohort = dir.path().join("nan.toml");
    std::fs::write(
        &cohort,
        r#"
[cohort]
id = "nan"
name = "NaN"

[[students]]
id = "s1"
attendance = 50
assignment = 50
exam = nan
participation = 50
"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    neuroeval()
        .arg("batch")
        .arg("--cohort")
        .arg(&cohort)
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("student s1 has non-finite exam"));

    assert!(!out.exists());
}

#[test]
fn validate_sample_cohort() {
    neuroeval()
        .arg("validate")
        .arg("--cohort")
        .arg("../../cohorts/sample.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("CS101 Fall (5 students)"))
        .stdout(predicate::str::contains("All cohorts valid."));
}

#[test]
fn validate_directory() {
    neuroeval()
        .arg("validate")
        .arg("--cohort")
        .arg("../../cohorts")
        .assert()
        .success()
        .stdout(predicate::str::contains("CS101 Fall"))
        .stdout(predicate::str::contains("CS201 Honors"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[cohort]
id = "bad"
name = "Bad"

[[students]]
id = "x"
attendance = 120
assignment = 50
exam = 50
participation = 50

[[students]]
id = "x"
attendance = 50
assignment = 50
exam = 50
participation = 50
"#,
    )
    .unwrap();

    neuroeval()
        .arg("validate")
        .arg("--cohort")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] WARNING: attendance = 120"))
        .stdout(predicate::str::contains("duplicate student ID"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    neuroeval()
        .arg("validate")
        .arg("--cohort")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn batch_writes_all_formats() {
    let dir = TempDir::new().unwrap();

    neuroeval()
        .arg("batch")
        .arg("--cohort")
        .arg("../../cohorts/sample.toml")
        .arg("--output")
        .arg(dir.path())
        .arg("--format")
        .arg("all")
        .assert()
        .success()
        .stderr(predicate::str::contains("Complete: 5/5 students evaluated"))
        .stderr(predicate::str::contains("Excellent"));

    let mut extensions: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, ["html", "json", "md"]);
}

#[test]
fn batch_tag_filter() {
    let dir = TempDir::new().unwrap();

    neuroeval()
        .arg("batch")
        .arg("--cohort")
        .arg("../../cohorts/sample.toml")
        .arg("--output")
        .arg(dir.path())
        .arg("--filter")
        .arg("section-b")
        .assert()
        .success()
        .stderr(predicate::str::contains("Complete: 2/5 students evaluated"));
}

#[test]
fn batch_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();

    neuroeval()
        .arg("batch")
        .arg("--cohort")
        .arg("../../cohorts/sample.toml")
        .arg("--output")
        .arg(dir.path())
        .arg("--format")
        .arg("sarif")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn curves_table() {
    neuroeval()
        .arg("curves")
        .arg("--variable")
        .arg("exam")
        .arg("--step")
        .arg("10")
        .assert()
        .success()
        .stdout(predicate::str::contains("exam membership functions"))
        .stdout(predicate::str::contains("medium"))
        .stdout(predicate::str::contains("0.500"));
}

#[test]
fn curves_output_variable() {
    neuroeval()
        .arg("curves")
        .arg("--variable")
        .arg("performance")
        .assert()
        .success()
        .stdout(predicate::str::contains("excellent"));
}

#[test]
fn curves_unknown_variable() {
    neuroeval()
        .arg("curves")
        .arg("--variable")
        .arg("homework")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variable: homework"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    neuroeval()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created neuroeval.toml"))
        .stdout(predicate::str::contains("Created cohorts/example.toml"));

    assert!(dir.path().join("neuroeval.toml").exists());
    assert!(dir.path().join("cohorts/example.toml").exists());

    // the generated files are usable as-is
    neuroeval()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--cohort")
        .arg("cohorts/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All cohorts valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    neuroeval()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    neuroeval()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn compare_reports() {
    let dir = TempDir::new().unwrap();

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");
    std::fs::write(&baseline_path, make_test_report("s1", [100.0; 4])).unwrap();
    std::fs::write(&current_path, make_test_report("s1", [0.0; 4])).unwrap();

    neuroeval()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 regressions"))
        .stdout(predicate::str::contains("s1: Excellent -> Poor"));

    neuroeval()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .arg("--fail-on-regression")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    neuroeval()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn help_output() {
    neuroeval()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuzzy-logic student performance evaluator"));
}

#[test]
fn version_output() {
    neuroeval()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("neuroeval"));
}

/// Build a one-student report JSON through the real `evaluate` pipeline.
fn make_test_report(student_id: &str, values: [f64; 4]) -> String {
    let args: Vec<String> = values.iter().map(f64::to_string).collect();
    let output = evaluate([&args[0], &args[1], &args[2], &args[3]])
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    let evaluation: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let mut category_counts = serde_json::Map::new();
    category_counts.insert(
        evaluation["category"].as_str().unwrap().to_string(),
        serde_json::json!(1),
    );

    let [attendance, assignment, exam, participation] = values;
    let report = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "created_at": "2025-01-01T00:00:00Z",
        "cohort": { "id": "test", "name": "Test", "student_count": 1 },
        "resolution": 1.0,
        "results": [{
            "student_id": student_id,
            "name": "",
            "inputs": {
                "attendance": attendance,
                "assignment": assignment,
                "exam": exam,
                "participation": participation
            },
            "evaluation": evaluation
        }],
        "stats": {
            "count": 1,
            "mean_score": evaluation["score"],
            "median_score": evaluation["score"],
            "min_score": evaluation["score"],
            "max_score": evaluation["score"],
            "std_dev": 0.0,
            "category_counts": category_counts,
            "metric_means": {}
        },
        "duration_ms": 1
    });
    report.to_string()
}
