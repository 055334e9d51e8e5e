// End-to-end tests for the scan orchestrator

use pydoctor_rs::config::Config;
use pydoctor_rs::issue::{Category, Severity};
use pydoctor_rs::scanner::Doctor;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn test_scan_walks_the_tree_and_aggregates() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "app.py",
        "def run():\n    \"\"\"Run the app end to end, then exit.\"\"\"\n    pass\n",
    );
    write_file(dir.path(), "pkg/util.py", "# TODO: move this elsewhere\n");
    write_file(dir.path(), "README.md", "def not_python(): pass\n");

    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();

    // Only the two .py files are scanned.
    assert_eq!(report.summary.total_files, 2);
    let files: Vec<String> = report
        .results
        .iter()
        .map(|r| r.file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["app.py", "util.py"]);

    let app = &report.results[0];
    assert!(app.issues.iter().any(|i| i.category == Category::Stubs));
    let util = &report.results[1];
    assert!(util.issues.iter().any(|i| i.category == Category::Todos));
}

#[test]
fn test_syntax_error_surfaces_as_critical() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "broken.py", "def broken(:\n    pass\n");

    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();

    assert_eq!(report.summary.total_files, 1);
    assert_eq!(report.summary.critical, 1);
    assert_eq!(report.results[0].issues.len(), 1);
    assert_eq!(report.results[0].issues[0].category, Category::SyntaxErrors);
}

#[test]
fn test_test_gap_flagged_without_companion_file() {
    let dir = tempdir().unwrap();
    let module = r#"def alpha():
    """Return the first coefficient of the model."""
    return compute_alpha()

def beta():
    """Return the second coefficient of the model."""
    return compute_beta()
"#;
    write_file(dir.path(), "model.py", module);

    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();
    let gaps: Vec<_> = report.results[0]
        .issues
        .iter()
        .filter(|i| i.category == Category::TestGaps)
        .collect();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].severity, Severity::Serious);
    assert_eq!(gaps[0].details["module_name"], "model");
    assert_eq!(gaps[0].details["public_function_count"], 2);
}

#[test]
fn test_companion_file_in_tests_dir_clears_the_gap() {
    let dir = tempdir().unwrap();
    let module = r#"def alpha():
    """Return the first coefficient of the model."""
    return compute_alpha()

def beta():
    """Return the second coefficient of the model."""
    return compute_beta()
"#;
    write_file(dir.path(), "model.py", module);
    write_file(dir.path(), "tests/test_model.py", "def test_alpha():\n    assert True\n");

    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();

    let model = report
        .results
        .iter()
        .find(|r| r.file.file_name().unwrap() == "model.py")
        .unwrap();
    assert!(model
        .issues
        .iter()
        .all(|i| i.category != Category::TestGaps));
}

#[test]
fn test_sibling_suffix_convention_also_clears_the_gap() {
    let dir = tempdir().unwrap();
    let module = "def alpha():\n    return 1\n\ndef beta():\n    return 2\n";
    write_file(dir.path(), "pkg/model.py", module);
    write_file(dir.path(), "pkg/model_test.py", "def test_alpha():\n    assert True\n");

    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();

    let model = report
        .results
        .iter()
        .find(|r| r.file.file_name().unwrap() == "model.py")
        .unwrap();
    assert!(model
        .issues
        .iter()
        .all(|i| i.category != Category::TestGaps));
}

#[test]
fn test_ignore_patterns_exclude_paths() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "app.py", "# TODO: keep\n");
    write_file(dir.path(), "venv/lib.py", "# TODO: skip\n");
    write_file(dir.path(), "generated_pb2.py", "# TODO: skip\n");

    let mut config = Config::default();
    config.ignore_patterns.push("*_pb2.py".to_string());
    let doctor = Doctor::new(config, 1);
    let report = doctor.scan(dir.path()).unwrap();

    assert_eq!(report.summary.total_files, 1);
    assert_eq!(
        report.results[0].file.file_name().unwrap(),
        "app.py"
    );
}

#[test]
fn test_worker_count_does_not_change_results() {
    let dir = tempdir().unwrap();
    for n in 0..8 {
        let source = format!(
            "# TODO: module {n}\ndef handler_{n}(payload):\n    return None\n"
        );
        write_file(dir.path(), &format!("mod_{n}.py"), &source);
    }
    write_file(dir.path(), "broken.py", "class Oops(\n");

    let config = Config::default();
    let serial = Doctor::new(config.clone(), 1).scan(dir.path()).unwrap();
    let parallel = Doctor::new(config, 4).scan(dir.path()).unwrap();

    assert_eq!(
        serde_json::to_string(&serial.results).unwrap(),
        serde_json::to_string(&parallel.results).unwrap()
    );
    assert_eq!(serial.summary.total_issues, parallel.summary.total_issues);
}

#[test]
fn test_summary_counts_by_severity() {
    let dir = tempdir().unwrap();
    // One syntax error (critical); a stub (serious) that is also
    // suspiciously short (minor), plus a TODO (minor).
    write_file(dir.path(), "a.py", "def broken(:\n");
    write_file(
        dir.path(),
        "b.py",
        "# TODO: fill in\ndef f():\n    \"\"\"Placeholder until the backend lands.\"\"\"\n    pass\n",
    );

    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();

    assert_eq!(report.summary.total_files, 2);
    assert_eq!(report.summary.critical, 1);
    assert_eq!(report.summary.serious, 1);
    assert_eq!(report.summary.minor, 2);
    assert_eq!(
        report.summary.total_issues,
        report.summary.critical + report.summary.serious + report.summary.minor
    );
}

#[test]
fn test_empty_tree_produces_empty_report() {
    let dir = tempdir().unwrap();
    let doctor = Doctor::new(Config::default(), 1);
    let report = doctor.scan(dir.path()).unwrap();
    assert_eq!(report.summary.total_files, 0);
    assert_eq!(report.summary.total_issues, 0);
    assert!(report.results.is_empty());
}
