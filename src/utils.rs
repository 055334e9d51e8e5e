use rustpython_ast::{self as ast, Constant, Expr, Stmt, TextSize};
use rustpython_parser::text_size::TextRange;

/// A utility struct to convert byte offsets to line numbers.
///
/// The AST parser works with byte offsets, but issues are reported with
/// 1-indexed line numbers.
pub struct LineIndex {
    /// Byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = offset.to_usize();
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Uniform read-only view over `FunctionDef` and `AsyncFunctionDef` nodes.
/// Detectors treat sync and async functions identically.
pub struct FunctionView<'a> {
    pub name: &'a str,
    pub body: &'a [Stmt],
    pub args: &'a ast::Arguments,
    pub decorator_list: &'a [Expr],
    pub returns: Option<&'a Expr>,
    pub range: TextRange,
}

/// Returns a `FunctionView` if the statement defines a function or method.
pub fn as_function(stmt: &Stmt) -> Option<FunctionView<'_>> {
    match stmt {
        Stmt::FunctionDef(node) => Some(FunctionView {
            name: node.name.as_str(),
            body: &node.body,
            args: &node.args,
            decorator_list: &node.decorator_list,
            returns: node.returns.as_deref(),
            range: node.range,
        }),
        Stmt::AsyncFunctionDef(node) => Some(FunctionView {
            name: node.name.as_str(),
            body: &node.body,
            args: &node.args,
            decorator_list: &node.decorator_list,
            returns: node.returns.as_deref(),
            range: node.range,
        }),
        _ => None,
    }
}

/// Pre-order, declaration-order walk over a statement suite.
///
/// Visits each statement before its children and descends into every
/// compound statement, so nested functions, methods, and inner classes are
/// all reached in a deterministic order.
pub fn walk_stmts<'a>(suite: &'a [Stmt], visit: &mut dyn FnMut(&'a Stmt)) {
    for stmt in suite {
        visit(stmt);
        match stmt {
            Stmt::FunctionDef(node) => walk_stmts(&node.body, visit),
            Stmt::AsyncFunctionDef(node) => walk_stmts(&node.body, visit),
            Stmt::ClassDef(node) => walk_stmts(&node.body, visit),
            Stmt::If(node) => {
                walk_stmts(&node.body, visit);
                walk_stmts(&node.orelse, visit);
            }
            Stmt::For(node) => {
                walk_stmts(&node.body, visit);
                walk_stmts(&node.orelse, visit);
            }
            Stmt::AsyncFor(node) => {
                walk_stmts(&node.body, visit);
                walk_stmts(&node.orelse, visit);
            }
            Stmt::While(node) => {
                walk_stmts(&node.body, visit);
                walk_stmts(&node.orelse, visit);
            }
            Stmt::With(node) => walk_stmts(&node.body, visit),
            Stmt::AsyncWith(node) => walk_stmts(&node.body, visit),
            Stmt::Try(node) => {
                walk_stmts(&node.body, visit);
                for handler in &node.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    walk_stmts(&h.body, visit);
                }
                walk_stmts(&node.orelse, visit);
                walk_stmts(&node.finalbody, visit);
            }
            Stmt::TryStar(node) => {
                walk_stmts(&node.body, visit);
                for handler in &node.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    walk_stmts(&h.body, visit);
                }
                walk_stmts(&node.orelse, visit);
                walk_stmts(&node.finalbody, visit);
            }
            Stmt::Match(node) => {
                for case in &node.cases {
                    walk_stmts(&case.body, visit);
                }
            }
            _ => {}
        }
    }
}

/// Visits every function and method in the suite, in pre-order
/// declaration order.
pub fn for_each_function<'a>(suite: &'a [Stmt], f: &mut dyn FnMut(FunctionView<'a>)) {
    walk_stmts(suite, &mut |stmt| {
        if let Some(func) = as_function(stmt) {
            f(func);
        }
    });
}

/// Visits every class definition in the suite, in pre-order declaration
/// order (nested classes included).
pub fn for_each_class<'a>(suite: &'a [Stmt], f: &mut dyn FnMut(&'a ast::StmtClassDef)) {
    walk_stmts(suite, &mut |stmt| {
        if let Stmt::ClassDef(node) = stmt {
            f(node);
        }
    });
}

/// Extracts the docstring: the leading string-literal expression statement
/// of a body, if present.
pub fn docstring(body: &[Stmt]) -> Option<&str> {
    if let Some(Stmt::Expr(expr_stmt)) = body.first() {
        if let Expr::Constant(constant) = &*expr_stmt.value {
            if let Constant::Str(s) = &constant.value {
                return Some(s);
            }
        }
    }
    None
}

/// Returns the body with a leading docstring statement removed.
pub fn strip_docstring(body: &[Stmt]) -> &[Stmt] {
    if docstring(body).is_some() {
        &body[1..]
    } else {
        body
    }
}

/// True if the statement is a bare ellipsis expression (`...`).
pub fn is_ellipsis_stmt(stmt: &Stmt) -> bool {
    if let Stmt::Expr(expr_stmt) = stmt {
        if let Expr::Constant(constant) = &*expr_stmt.value {
            return matches!(constant.value, Constant::Ellipsis);
        }
    }
    false
}

/// True if the statement raises `NotImplementedError`, either called with
/// any arguments or raised as a bare name.
pub fn is_not_implemented_raise(stmt: &Stmt) -> bool {
    let Stmt::Raise(node) = stmt else {
        return false;
    };
    let Some(exc) = &node.exc else {
        return false;
    };
    match &**exc {
        Expr::Call(call) => {
            matches!(&*call.func, Expr::Name(name) if name.id.as_str() == "NotImplementedError")
        }
        Expr::Name(name) => name.id.as_str() == "NotImplementedError",
        _ => false,
    }
}

/// The bare name of a decorator: `@name` gives `name`, `@obj.attr` gives
/// `attr`. Call forms and other expressions give nothing.
pub fn decorator_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(node) => Some(node.id.as_str()),
        Expr::Attribute(node) => Some(node.attr.as_str()),
        _ => None,
    }
}

/// True for dunder names like `__init__`.
pub fn is_dunder(name: &str) -> bool {
    name.starts_with("__") && name.ends_with("__")
}

/// Truncates a string to at most `max` characters, respecting char
/// boundaries.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
