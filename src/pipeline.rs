use crate::config::Config;
use crate::issue::{Category, Issue, Metrics, ScanResult};
use crate::rules::registry;
use crate::source::SourceUnit;
use std::path::PathBuf;

/// Explicit per-scan context: the configuration snapshot plus the project
/// root. Created once at scan start and shared read-only across workers;
/// there is no ambient global state.
pub struct ScanContext {
    pub config: Config,
    pub project_root: PathBuf,
}

impl ScanContext {
    pub fn new(config: Config, project_root: PathBuf) -> Self {
        Self {
            config,
            project_root,
        }
    }
}

/// Runs the full diagnostic pipeline over one source unit.
///
/// The syntax gate comes first: an invalid unit yields exactly one
/// `syntax_errors` issue and nothing else (only the line count metric is
/// kept). Valid units run every registered detector in the fixed registry
/// order; a failing detector is logged and skipped without affecting the
/// others.
pub fn scan_unit(unit: &SourceUnit, ctx: &ScanContext) -> ScanResult {
    let mut metrics = Metrics {
        total_lines: unit.lines.len(),
        ..Metrics::default()
    };
    let mut issues = Vec::new();

    if let Some(failure) = &unit.parse_failure {
        issues.push(
            Issue::new(
                Category::SyntaxErrors,
                ctx.config.severity_of(Category::SyntaxErrors),
                failure.line,
                format!("SyntaxError: {}", failure.message),
            )
            .with_detail("error_type", "SyntaxError")
            .with_detail("offset", failure.offset)
            .with_detail("text", failure.snippet.as_str()),
        );
        return ScanResult {
            file: unit.file.clone(),
            issues,
            metrics,
        };
    }

    for detector in registry() {
        match detector.run(unit, ctx, &mut metrics) {
            Ok(found) => issues.extend(found),
            Err(err) => {
                log::debug!(
                    "{} detector failed on {}: {err}",
                    detector.category(),
                    unit.file.display()
                );
            }
        }
    }

    ScanResult {
        file: unit.file.clone(),
        issues,
        metrics,
    }
}
