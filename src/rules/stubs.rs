use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{for_each_function, is_ellipsis_stmt, is_not_implemented_raise, strip_docstring};
use anyhow::Result;
use rustpython_ast::Stmt;

/// Classifies a single-statement body as a stub, if it is one.
///
/// The three stub shapes are a `pass` statement, a bare ellipsis
/// expression, and a raise of `NotImplementedError`.
pub fn stub_kind(stmt: &Stmt) -> Option<&'static str> {
    if matches!(stmt, Stmt::Pass(_)) {
        Some("pass statement")
    } else if is_ellipsis_stmt(stmt) {
        Some("ellipsis (...)")
    } else if is_not_implemented_raise(stmt) {
        Some("NotImplementedError")
    } else {
        None
    }
}

/// Flags functions and methods whose entire non-docstring body is a single
/// stub statement.
pub struct StubDetector;

impl Detector for StubDetector {
    fn category(&self) -> Category {
        Category::Stubs
    }

    fn run(
        &self,
        unit: &SourceUnit,
        ctx: &ScanContext,
        _metrics: &mut Metrics,
    ) -> Result<Vec<Issue>> {
        let severity = ctx.config.severity_of(self.category());
        let mut issues = Vec::new();
        let Some(suite) = &unit.suite else {
            return Ok(issues);
        };

        for_each_function(suite, &mut |func| {
            if ctx.config.is_ignored_function(func.name) {
                return;
            }

            let body = strip_docstring(func.body);
            // Only an exactly-one-statement body can be a stub.
            if body.len() != 1 {
                return;
            }

            if let Some(kind) = stub_kind(&body[0]) {
                issues.push(
                    Issue::new(
                        self.category(),
                        severity,
                        unit.line_of(func.range.start()),
                        format!("Stub implementation in {}()", func.name),
                    )
                    .with_detail("function_name", func.name)
                    .with_detail("stub_type", kind),
                );
            }
        });

        Ok(issues)
    }
}
