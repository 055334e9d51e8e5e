// Unit tests for stub body detection

use pydoctor_rs::config::Config;
use pydoctor_rs::issue::{Issue, Metrics, Severity};
use pydoctor_rs::pipeline::ScanContext;
use pydoctor_rs::rules::stubs::StubDetector;
use pydoctor_rs::rules::Detector;
use pydoctor_rs::source::SourceUnit;
use std::path::PathBuf;

fn scan(source: &str) -> Vec<Issue> {
    let unit = SourceUnit::from_source(PathBuf::from("mod.py"), source.to_string());
    let ctx = ScanContext::new(Config::default(), PathBuf::from("/nonexistent"));
    let mut metrics = Metrics::default();
    StubDetector.run(&unit, &ctx, &mut metrics).unwrap()
}

#[test]
fn test_pass_stub() {
    let issues = scan("def f():\n    pass\n");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].line, 1);
    assert_eq!(issues[0].severity, Severity::Serious);
    assert_eq!(issues[0].details["function_name"], "f");
    assert_eq!(issues[0].details["stub_type"], "pass statement");
}

#[test]
fn test_ellipsis_stub() {
    let issues = scan("def f():\n    ...\n");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].details["stub_type"], "ellipsis (...)");
}

#[test]
fn test_not_implemented_stub_both_forms() {
    let source = r#"
def called():
    raise NotImplementedError("soon")

def bare():
    raise NotImplementedError
"#;
    let issues = scan(source);
    assert_eq!(issues.len(), 2);
    assert!(issues
        .iter()
        .all(|i| i.details["stub_type"] == "NotImplementedError"));
}

#[test]
fn test_docstring_is_stripped_before_classification() {
    let source = "def f():\n    \"\"\"Docstring.\"\"\"\n    pass\n";
    let issues = scan(source);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].details["stub_type"], "pass statement");
}

#[test]
fn test_docstring_only_body_is_not_a_stub() {
    let issues = scan("def f():\n    \"\"\"Docstring only.\"\"\"\n");
    assert!(issues.is_empty());
}

#[test]
fn test_other_single_statement_is_not_a_stub() {
    let issues = scan("def f():\n    print(\"working\")\n");
    assert!(issues.is_empty());

    let issues = scan("def f():\n    raise ValueError(\"real error\")\n");
    assert!(issues.is_empty());
}

#[test]
fn test_multi_statement_body_is_not_a_stub() {
    let issues = scan("def f():\n    pass\n    pass\n");
    assert!(issues.is_empty());
}

#[test]
fn test_ignored_functions_are_skipped() {
    // __init__ is in the default ignore set.
    let source = r#"
class C:
    def __init__(self):
        pass
"#;
    let issues = scan(source);
    assert!(issues.is_empty());
}

#[test]
fn test_methods_and_nested_functions_are_covered() {
    let source = r#"
class C:
    def method(self):
        ...

def outer():
    def inner():
        pass
    return inner
"#;
    let issues = scan(source);
    let names: Vec<&str> = issues
        .iter()
        .map(|i| i.details["function_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["method", "inner"]);
}

#[test]
fn test_async_function_stub() {
    let issues = scan("async def f():\n    pass\n");
    assert_eq!(issues.len(), 1);
}
