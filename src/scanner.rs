use crate::config::Config;
use crate::issue::{ScanResult, Severity};
use crate::pipeline::{scan_unit, ScanContext};
use crate::source::SourceUnit;
use anyhow::Result;
use glob::Pattern;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Aggregate outcome of a multi-unit scan, handed to the reporting layer.
#[derive(Serialize)]
pub struct ScanReport {
    /// One result per scanned unit. Keyed by file path; per-unit content is
    /// independent of the order units were processed in.
    pub results: Vec<ScanResult>,
    pub summary: ScanSummary,
}

/// Cross-unit totals for the report header.
#[derive(Serialize)]
pub struct ScanSummary {
    pub total_files: usize,
    pub total_issues: usize,
    pub critical: usize,
    pub serious: usize,
    pub minor: usize,
    pub total_functions: usize,
    pub documented_functions: usize,
    pub type_hinted_functions: usize,
}

/// The scan orchestrator.
///
/// Fans source files out across a bounded rayon pool. Every unit is a
/// self-contained task; the only shared state is the read-only
/// `ScanContext`, so no locking is involved.
pub struct Doctor {
    config: Config,
    /// Worker pool size. Zero means rayon's default.
    jobs: usize,
}

impl Doctor {
    pub fn new(config: Config, jobs: usize) -> Self {
        Self { config, jobs }
    }

    /// Scans every Python file under `root` and aggregates the results.
    ///
    /// Per-unit failures never abort the scan: an unreadable file is logged
    /// and contributes an empty bookkeeping result.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        let ctx = ScanContext::new(self.config.clone(), root.to_path_buf());
        let ignore = compile_patterns(&self.config.ignore_patterns);
        let files = discover_files(root, &ignore);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()?;
        let results: Vec<ScanResult> = pool.install(|| {
            files
                .par_iter()
                .map(|path| match SourceUnit::load(path) {
                    Ok(unit) => scan_unit(&unit, &ctx),
                    Err(err) => {
                        log::error!("failed to read {}: {err}", path.display());
                        ScanResult::empty(path.clone())
                    }
                })
                .collect()
        });

        let summary = summarize(&results);
        Ok(ScanReport { results, summary })
    }
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|raw| match Pattern::new(raw) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                log::warn!("ignoring bad glob pattern {raw:?}: {err}");
                None
            }
        })
        .collect()
}

/// Finds `.py` files under the root, honoring the ignore globs. Sorted for
/// a deterministic work queue.
fn discover_files(root: &Path, ignore: &[Pattern]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "py"))
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| !is_ignored(root, path, ignore))
        .collect();
    files.sort();
    files
}

fn is_ignored(root: &Path, path: &Path, ignore: &[Pattern]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    // Globs are written with forward slashes; normalize before matching.
    let relative = relative.to_string_lossy().replace('\\', "/");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ignore
        .iter()
        .any(|pattern| pattern.matches(&relative) || pattern.matches(&file_name))
}

fn summarize(results: &[ScanResult]) -> ScanSummary {
    let mut summary = ScanSummary {
        total_files: results.len(),
        total_issues: 0,
        critical: 0,
        serious: 0,
        minor: 0,
        total_functions: 0,
        documented_functions: 0,
        type_hinted_functions: 0,
    };
    for result in results {
        summary.total_issues += result.issues.len();
        for issue in &result.issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Serious => summary.serious += 1,
                Severity::Minor => summary.minor += 1,
            }
        }
        summary.total_functions += result.metrics.total_functions;
        summary.documented_functions += result.metrics.documented_functions;
        summary.type_hinted_functions += result.metrics.type_hinted_functions;
    }
    summary
}
