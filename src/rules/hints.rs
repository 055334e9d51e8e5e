use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{for_each_function, FunctionView};
use anyhow::Result;
use rustpython_ast::ArgWithDefault;

/// At most this many missing annotations are spelled out in the message;
/// the details map always carries the full list.
pub const MAX_REPORTED_HINTS: usize = 5;

fn is_receiver(index: usize, arg: &ArgWithDefault) -> bool {
    index == 0 && matches!(arg.def.arg.as_str(), "self" | "cls")
}

/// Collects the missing annotations for a function, in signature order.
fn missing_hints(func: &FunctionView<'_>) -> Vec<String> {
    let mut missing = Vec::new();

    if func.returns.is_none() {
        missing.push("return type".to_string());
    }

    let positional: Vec<&ArgWithDefault> = func
        .args
        .posonlyargs
        .iter()
        .chain(func.args.args.iter())
        .collect();
    for (index, arg) in positional.iter().enumerate() {
        if is_receiver(index, arg) {
            continue;
        }
        if arg.def.annotation.is_none() {
            missing.push(format!("param '{}'", arg.def.arg.as_str()));
        }
    }

    if let Some(vararg) = &func.args.vararg {
        if vararg.annotation.is_none() {
            missing.push("*args".to_string());
        }
    }
    if let Some(kwarg) = &func.args.kwarg {
        if kwarg.annotation.is_none() {
            missing.push("**kwargs".to_string());
        }
    }
    for arg in &func.args.kwonlyargs {
        if arg.def.annotation.is_none() {
            missing.push(format!("param '{}'", arg.def.arg.as_str()));
        }
    }

    missing
}

/// True when the signature already carries at least one annotation (return
/// type or any non-receiver positional parameter).
fn has_any_hints(func: &FunctionView<'_>) -> bool {
    if func.returns.is_some() {
        return true;
    }
    func.args
        .posonlyargs
        .iter()
        .chain(func.args.args.iter())
        .enumerate()
        .any(|(index, arg)| !is_receiver(index, arg) && arg.def.annotation.is_some())
}

/// Reports partially annotated functions and owns the
/// `type_hinted_functions` metric.
///
/// Functions with no annotations at all are counted but never flagged, so
/// fully legacy code does not drown the report.
pub struct TypeHintDetector;

impl Detector for TypeHintDetector {
    fn category(&self) -> Category {
        Category::TypeHintGaps
    }

    fn run(
        &self,
        unit: &SourceUnit,
        ctx: &ScanContext,
        metrics: &mut Metrics,
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

            let missing = missing_hints(&func);
            if missing.is_empty() {
                metrics.type_hinted_functions += 1;
                return;
            }

            if !has_any_hints(&func) {
                return;
            }

            let reported: Vec<&str> = missing
                .iter()
                .take(MAX_REPORTED_HINTS)
                .map(String::as_str)
                .collect();
            issues.push(
                Issue::new(
                    self.category(),
                    severity,
                    unit.line_of(func.range.start()),
                    format!(
                        "Incomplete type hints in {}(): missing {}",
                        func.name,
                        reported.join(", ")
                    ),
                )
                .with_detail("function_name", func.name)
                .with_detail("missing_hints", missing.clone()),
            );
        });

        Ok(issues)
    }
}
