use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{for_each_function, strip_docstring};
use anyhow::Result;
use rustpython_ast::{Constant, Expr, Stmt, UnaryOp};

/// The canonical placeholder kinds, exactly the labels this detector can
/// emit. Kept as a constant so tests can enumerate the set exhaustively.
pub const PLACEHOLDER_KINDS: [&str; 11] = [
    "None (implicit)",
    "None",
    "Zero",
    "Empty String",
    "False",
    "True",
    "Negative One",
    "Empty List",
    "Empty Dict",
    "Empty Tuple",
    "Empty Set",
];

/// Classifies a return value against the canonical placeholder set.
/// `None` for the argument means a bare `return`.
pub fn placeholder_return_kind(value: Option<&Expr>) -> Option<&'static str> {
    let Some(value) = value else {
        return Some("None (implicit)");
    };
    match value {
        Expr::Constant(node) => match &node.value {
            Constant::None => Some("None"),
            Constant::Bool(false) => Some("False"),
            Constant::Bool(true) => Some("True"),
            Constant::Int(i) if i.to_string() == "0" => Some("Zero"),
            Constant::Str(s) if s.is_empty() => Some("Empty String"),
            _ => None,
        },
        // `-1` parses as a unary minus applied to the literal 1.
        Expr::UnaryOp(node) if matches!(node.op, UnaryOp::USub) => match &*node.operand {
            Expr::Constant(inner) => match &inner.value {
                Constant::Int(i) if i.to_string() == "1" => Some("Negative One"),
                _ => None,
            },
            _ => None,
        },
        Expr::List(node) if node.elts.is_empty() => Some("Empty List"),
        Expr::Dict(node) if node.keys.is_empty() => Some("Empty Dict"),
        Expr::Tuple(node) if node.elts.is_empty() => Some("Empty Tuple"),
        Expr::Set(node) if node.elts.is_empty() => Some("Empty Set"),
        _ => None,
    }
}

/// Flags functions whose entire non-docstring body is one return of a
/// canonical placeholder value. A sole return of anything else (a computed
/// expression, a call, a non-placeholder literal) is not flagged.
pub struct SimpleReturnDetector;

impl Detector for SimpleReturnDetector {
    fn category(&self) -> Category {
        Category::SimpleReturns
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
            let [Stmt::Return(ret)] = body else {
                return;
            };

            if let Some(kind) = placeholder_return_kind(ret.value.as_deref()) {
                issues.push(
                    Issue::new(
                        self.category(),
                        severity,
                        unit.line_of(ret.range.start()),
                        format!("Placeholder return in {}()", func.name),
                    )
                    .with_detail("function_name", func.name)
                    .with_detail("return_type", kind),
                );
            }
        });

        Ok(issues)
    }
}
