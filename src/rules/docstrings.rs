use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{as_function, docstring, walk_stmts};
use anyhow::Result;
use rustpython_ast::Stmt;

/// True when the docstring exists and its trimmed length meets the
/// configured minimum.
fn is_documented(body: &[Stmt], min_len: usize) -> bool {
    docstring(body).is_some_and(|doc| doc.trim().chars().count() >= min_len)
}

/// Checks docstring coverage for classes, functions, and methods.
///
/// Sole owner of the `total_classes`, `total_functions`, and
/// `documented_functions` metrics. Module-private names (single leading
/// underscore) are counted toward the function total but exempt from the
/// docstring requirement.
pub struct DocstringDetector;

impl Detector for DocstringDetector {
    fn category(&self) -> Category {
        Category::MissingDocstrings
    }

    fn run(
        &self,
        unit: &SourceUnit,
        ctx: &ScanContext,
        metrics: &mut Metrics,
    ) -> Result<Vec<Issue>> {
        let severity = ctx.config.severity_of(self.category());
        let min_len = ctx.config.min_docstring_length;
        let mut issues = Vec::new();
        let Some(suite) = &unit.suite else {
            return Ok(issues);
        };

        walk_stmts(suite, &mut |stmt| {
            if let Stmt::ClassDef(class) = stmt {
                metrics.total_classes += 1;
                if !is_documented(&class.body, min_len) {
                    issues.push(
                        Issue::new(
                            self.category(),
                            severity,
                            unit.line_of(class.range.start()),
                            format!("Missing or short docstring for class {}", class.name.as_str()),
                        )
                        .with_detail("entity_type", "class")
                        .with_detail("entity_name", class.name.as_str()),
                    );
                }
            } else if let Some(func) = as_function(stmt) {
                if ctx.config.is_ignored_function(func.name) {
                    return;
                }

                metrics.total_functions += 1;

                // Module-private helpers are counted but not required to
                // carry documentation.
                if func.name.starts_with('_') && !func.name.starts_with("__") {
                    return;
                }

                if is_documented(func.body, min_len) {
                    metrics.documented_functions += 1;
                } else {
                    issues.push(
                        Issue::new(
                            self.category(),
                            severity,
                            unit.line_of(func.range.start()),
                            format!("Missing or short docstring for function {}()", func.name),
                        )
                        .with_detail("entity_type", "function")
                        .with_detail("entity_name", func.name),
                    );
                }
            }
        });

        Ok(issues)
    }
}
