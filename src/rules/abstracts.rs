use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::{as_function, decorator_name, for_each_class, is_not_implemented_raise, strip_docstring};
use anyhow::Result;
use rustpython_ast::{Constant, Expr, Stmt, StmtClassDef};

/// Base class and metaclass names that mark a class as abstract.
pub const ABSTRACT_BASE_MARKERS: [&str; 2] = ["ABC", "ABCMeta"];

/// Decorator names that mark a method as abstract.
pub const ABSTRACT_METHOD_MARKERS: [&str; 2] = ["abstractmethod", "abstractproperty"];

/// True when the class inherits an abstract base marker or declares
/// `metaclass=ABCMeta`.
fn is_abstract_class(class: &StmtClassDef) -> bool {
    let inherits_marker = class.bases.iter().any(|base| match base {
        Expr::Name(name) => ABSTRACT_BASE_MARKERS.contains(&name.id.as_str()),
        Expr::Attribute(attr) => ABSTRACT_BASE_MARKERS.contains(&attr.attr.as_str()),
        _ => false,
    });
    if inherits_marker {
        return true;
    }
    class.keywords.iter().any(|keyword| {
        keyword.arg.as_ref().is_some_and(|arg| arg.as_str() == "metaclass")
            && matches!(&keyword.value, Expr::Name(name) if name.id.as_str() == "ABCMeta")
    })
}

/// A statement counts as real implementation unless it is a no-op, a bare
/// expression, or a return whose value is absent or the literal `None`.
///
/// Known false-negative class: a `return 0` (or any other placeholder
/// literal) still counts as "real" here. That asymmetry with the
/// placeholder-return detector is a deliberate noise-reduction tradeoff.
fn is_real_implementation(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Pass(_) | Stmt::Expr(_) => false,
        Stmt::Return(ret) => match ret.value.as_deref() {
            None => false,
            Some(Expr::Constant(c)) if matches!(c.value, Constant::None) => false,
            Some(_) => true,
        },
        _ => true,
    }
}

/// Checks that abstract-marked methods inside abstract classes either
/// declare their contract properly (sole `raise NotImplementedError`) or
/// contain real implementation. Anything else is an unfinished contract.
pub struct AbstractMethodDetector;

impl Detector for AbstractMethodDetector {
    fn category(&self) -> Category {
        Category::UnimplementedAbstracts
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
            if !is_abstract_class(class) {
                return;
            }

            for item in &class.body {
                let Some(method) = as_function(item) else {
                    continue;
                };
                let marked_abstract = method.decorator_list.iter().any(|dec| {
                    decorator_name(dec)
                        .is_some_and(|name| ABSTRACT_METHOD_MARKERS.contains(&name))
                });
                if !marked_abstract {
                    continue;
                }

                let body = strip_docstring(method.body);

                // The canonical abstract contract: a lone raise of
                // NotImplementedError is exactly what it should be.
                if body.len() == 1 && is_not_implemented_raise(&body[0]) {
                    continue;
                }

                let has_real = body.iter().any(is_real_implementation);
                if !has_real && !body.is_empty() {
                    issues.push(
                        Issue::new(
                            self.category(),
                            severity,
                            unit.line_of(method.range.start()),
                            format!(
                                "Abstract method {}.{}() has no implementation",
                                class.name.as_str(),
                                method.name
                            ),
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
