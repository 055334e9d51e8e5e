use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Closed set of diagnostic categories.
/// Every issue the engine produces belongs to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SyntaxErrors,
    Todos,
    Stubs,
    SimpleReturns,
    IncompleteMethods,
    MissingDocstrings,
    SuspiciousShortFunctions,
    UnimplementedAbstracts,
    TypeHintGaps,
    TestGaps,
}

impl Category {
    /// All categories, in a fixed order. Useful for report layers and tests
    /// that want to enumerate the taxonomy exhaustively.
    pub const ALL: [Category; 10] = [
        Category::SyntaxErrors,
        Category::Todos,
        Category::Stubs,
        Category::SimpleReturns,
        Category::IncompleteMethods,
        Category::MissingDocstrings,
        Category::SuspiciousShortFunctions,
        Category::UnimplementedAbstracts,
        Category::TypeHintGaps,
        Category::TestGaps,
    ];

    /// The compiled-in severity table. `Config::severity_of` consults the
    /// user override map first and falls back here, so a severity is never
    /// absent for any category.
    pub fn default_severity(self) -> Severity {
        match self {
            Category::SyntaxErrors | Category::UnimplementedAbstracts => Severity::Critical,
            Category::Stubs
            | Category::SimpleReturns
            | Category::IncompleteMethods
            | Category::TestGaps => Severity::Serious,
            Category::Todos
            | Category::MissingDocstrings
            | Category::SuspiciousShortFunctions
            | Category::TypeHintGaps => Severity::Minor,
        }
    }

    /// The snake_case name used in config files and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::SyntaxErrors => "syntax_errors",
            Category::Todos => "todos",
            Category::Stubs => "stubs",
            Category::SimpleReturns => "simple_returns",
            Category::IncompleteMethods => "incomplete_methods",
            Category::MissingDocstrings => "missing_docstrings",
            Category::SuspiciousShortFunctions => "suspicious_short_functions",
            Category::UnimplementedAbstracts => "unimplemented_abstracts",
            Category::TypeHintGaps => "type_hint_gaps",
            Category::TestGaps => "test_gaps",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment-blocking weight of an issue. Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Serious,
    Minor,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Serious => "serious",
            Severity::Minor => "minor",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic issue. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub category: Category,
    pub severity: Severity,
    /// 1-indexed line number in the source unit.
    pub line: usize,
    pub message: String,
    /// Named structured details (e.g. `function_name`, `stub_type`).
    /// A BTreeMap keeps serialization order deterministic.
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Issue {
    pub fn new(
        category: Category,
        severity: Severity,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            line,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Per-unit counters. Accumulated by side-effect while detectors run;
/// purely additive, never decremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total_lines: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub documented_functions: usize,
    pub type_hinted_functions: usize,
}

/// Complete diagnostic output for one source unit.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub file: PathBuf,
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
}

impl ScanResult {
    /// Bookkeeping result for a unit that could not be read.
    pub fn empty(file: PathBuf) -> Self {
        Self {
            file,
            issues: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    pub fn issues_by_severity(&self, severity: Severity) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    pub fn issues_by_category(&self, category: Category) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.category == category).collect()
    }
}
