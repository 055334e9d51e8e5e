// Unit tests for type-hint gap detection

use pydoctor_rs::config::Config;
use pydoctor_rs::issue::{Issue, Metrics};
use pydoctor_rs::pipeline::ScanContext;
use pydoctor_rs::rules::hints::{TypeHintDetector, MAX_REPORTED_HINTS};
use pydoctor_rs::rules::Detector;
use pydoctor_rs::source::SourceUnit;
use std::path::PathBuf;

fn scan(source: &str) -> (Vec<Issue>, Metrics) {
    let unit = SourceUnit::from_source(PathBuf::from("mod.py"), source.to_string());
    let ctx = ScanContext::new(Config::default(), PathBuf::from("/nonexistent"));
    let mut metrics = Metrics::default();
    let issues = TypeHintDetector.run(&unit, &ctx, &mut metrics).unwrap();
    (issues, metrics)
}

#[test]
fn test_fully_hinted_function_counts_toward_metric() {
    let (issues, metrics) = scan("def f(a: int, b: str) -> bool:\n    return a > len(b)\n");
    assert!(issues.is_empty());
    assert_eq!(metrics.type_hinted_functions, 1);
}

#[test]
fn test_partial_hints_flagged_with_missing_list() {
    let (issues, _) = scan("def f(a: int, b) -> int:\n    return a\n");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].details["function_name"], "f");
    let missing: Vec<String> = issues[0].details["missing_hints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(missing, vec!["param 'b'"]);
}

#[test]
fn test_zero_annotations_never_flagged() {
    // Fully legacy code stays quiet to avoid flooding.
    let (issues, metrics) = scan("def f(a, b):\n    return a + b\n");
    assert!(issues.is_empty());
    assert_eq!(metrics.type_hinted_functions, 0);
}

#[test]
fn test_missing_return_type_flagged_when_params_hinted() {
    let (issues, _) = scan("def f(a: int):\n    return a\n");
    assert_eq!(issues.len(), 1);
    let missing = issues[0].details["missing_hints"].as_array().unwrap();
    assert_eq!(missing[0], "return type");
}

#[test]
fn test_receiver_is_exempt() {
    let source = r#"
class C:
    def method(self, a: int) -> int:
        return a
"#;
    let (issues, metrics) = scan(source);
    assert!(issues.is_empty());
    assert_eq!(metrics.type_hinted_functions, 1);
}

#[test]
fn test_variadic_and_keyword_only_params_checked() {
    let source = "def f(a: int, *args, **kwargs) -> None:\n    return None\n";
    let (issues, _) = scan(source);
    assert_eq!(issues.len(), 1);
    let missing: Vec<&str> = issues[0].details["missing_hints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(missing, vec!["*args", "**kwargs"]);

    let source = "def f(a: int, *, key) -> None:\n    return None\n";
    let (issues, _) = scan(source);
    let missing = issues[0].details["missing_hints"].as_array().unwrap();
    assert_eq!(missing[0], "param 'key'");
}

#[test]
fn test_message_caps_at_five_entries_details_keep_all() {
    let source = "def f(a, b, c, d, e, g) -> int:\n    return 1\n";
    let (issues, _) = scan(source);
    assert_eq!(issues.len(), 1);
    let missing = issues[0].details["missing_hints"].as_array().unwrap();
    assert_eq!(missing.len(), 6);
    // The message only spells out the first five.
    let spelled = issues[0].message.matches("param '").count();
    assert_eq!(spelled, MAX_REPORTED_HINTS);
}

#[test]
fn test_ignored_functions_skipped() {
    let source = r#"
class C:
    def __init__(self, a: int):
        self.a = a
"#;
    let (issues, metrics) = scan(source);
    assert!(issues.is_empty());
    assert_eq!(metrics.type_hinted_functions, 0);
}
