use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{decorator_name, docstring, for_each_function, is_dunder};
use anyhow::Result;

/// Decorators that legitimize a short body. Matched against a decorator's
/// bare name or trailing attribute name.
pub const EXEMPT_DECORATORS: [&str; 5] =
    ["property", "setter", "getter", "staticmethod", "classmethod"];

/// Flags functions whose body span (docstring excluded) falls below the
/// configured minimum. Accessor-style decorated functions and dunder
/// methods are expected to be short and are skipped.
pub struct ShortFunctionDetector;

impl Detector for ShortFunctionDetector {
    fn category(&self) -> Category {
        Category::SuspiciousShortFunctions
    }

    fn run(
        &self,
        unit: &SourceUnit,
        ctx: &ScanContext,
        _metrics: &mut Metrics,
    ) -> Result<Vec<Issue>> {
        let severity = ctx.config.severity_of(self.category());
        let min_lines = ctx.config.min_function_lines as i64;
        let mut issues = Vec::new();
        let Some(suite) = &unit.suite else {
            return Ok(issues);
        };

        for_each_function(suite, &mut |func| {
            if ctx.config.is_ignored_function(func.name) || is_dunder(func.name) {
                return;
            }
            if func.body.is_empty() {
                return;
            }

            let start = unit.line_of(func.range.start()) as i64;
            let end = unit.line_of(func.range.end()) as i64;
            let mut span = end - start + 1;

            if let Some(doc) = docstring(func.body) {
                span -= doc.matches('\n').count() as i64 + 1;
            }

            if span >= min_lines {
                return;
            }

            let exempt = func.decorator_list.iter().any(|dec| {
                decorator_name(dec).is_some_and(|name| EXEMPT_DECORATORS.contains(&name))
            });
            if exempt {
                return;
            }

            issues.push(
                Issue::new(
                    self.category(),
                    severity,
                    unit.line_of(func.range.start()),
                    format!("Function {}() is suspiciously short", func.name),
                )
                .with_detail("function_name", func.name)
                .with_detail("line_count", span.max(1)),
            );
        });

        Ok(issues)
    }
}
