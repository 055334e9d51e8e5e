use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::returns::placeholder_return_kind;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{as_function, docstring, for_each_class, is_ellipsis_stmt, strip_docstring};
use anyhow::Result;
use rustpython_ast::Stmt;

/// Return values that make a documented method look unfinished. Narrower
/// than the placeholder set: `True` and `-1` are deliberate enough to pass.
fn is_trivial_return_kind(kind: &str) -> bool {
    matches!(
        kind,
        "None (implicit)"
            | "None"
            | "Zero"
            | "Empty String"
            | "False"
            | "Empty List"
            | "Empty Dict"
            | "Empty Tuple"
            | "Empty Set"
    )
}

fn is_trivial_statement(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Pass(_) => true,
        Stmt::Return(ret) => placeholder_return_kind(ret.value.as_deref())
            .is_some_and(is_trivial_return_kind),
        _ => is_ellipsis_stmt(stmt),
    }
}

/// Flags methods that carry a docstring but whose body is a single trivial
/// statement: documented intent, no implementation.
///
/// Scoped to methods defined directly inside a class body. A method showing
/// the same body shape without a docstring is the stub/placeholder-return
/// detectors' territory instead.
pub struct IncompleteMethodDetector;

impl Detector for IncompleteMethodDetector {
    fn category(&self) -> Category {
        Category::IncompleteMethods
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

        for_each_class(suite, &mut |class| {
            for item in &class.body {
                let Some(method) = as_function(item) else {
                    continue;
                };
                if ctx.config.is_ignored_function(method.name) {
                    continue;
                }
                // Requires a docstring; that is what distinguishes an
                // "incomplete" method from a plain stub.
                if docstring(method.body).is_none() {
                    continue;
                }

                let body = strip_docstring(method.body);
                if body.len() == 1 && is_trivial_statement(&body[0]) {
                    issues.push(
                        Issue::new(
                            self.category(),
                            severity,
                            unit.line_of(method.range.start()),
                            format!("Incomplete method {}.{}()", class.name.as_str(), method.name),
                        )
                        .with_detail("class_name", class.name.as_str())
                        .with_detail("method_name", method.name),
                    );
                }
            }
        });

        Ok(issues)
    }
}
