use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::as_function;
use anyhow::Result;
use std::path::PathBuf;

/// Public function count below which a module is not expected to have its
/// own test file.
pub const MIN_TESTWORTHY_FUNCTIONS: usize = 2;

/// File names that never need a companion test file.
pub const EXEMPT_FILE_NAMES: [&str; 3] = ["__init__.py", "setup.py", "conftest.py"];

fn is_test_file(file_name: &str) -> bool {
    file_name.starts_with("test_") || file_name.ends_with("_test.py")
}

/// Checks whether a module has a companion test file under the common
/// naming and placement conventions, and flags modules with enough public
/// surface to warrant one.
pub struct TestGapDetector;

impl Detector for TestGapDetector {
    fn category(&self) -> Category {
        Category::TestGaps
    }

    fn run(
        &self,
        unit: &SourceUnit,
        ctx: &ScanContext,
        _metrics: &mut Metrics,
    ) -> Result<Vec<Issue>> {
        let severity = ctx.config.severity_of(self.category());
        let mut issues = Vec::new();

        let file_name = unit
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Test files and packaging/fixture files are not themselves subject
        // to the coverage convention.
        if is_test_file(&file_name) || EXEMPT_FILE_NAMES.contains(&file_name.as_str()) {
            return Ok(issues);
        }

        let module_name = unit
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let candidates = [
            format!("test_{module_name}.py"),
            format!("{module_name}_test.py"),
        ];

        let root = &ctx.project_root;
        let mut search_dirs: Vec<PathBuf> = Vec::new();
        if let Some(parent) = unit.file.parent() {
            search_dirs.push(parent.to_path_buf());
        }
        search_dirs.push(root.clone());
        search_dirs.push(root.join("tests"));
        search_dirs.push(root.join("test"));

        // First hit anywhere ends the search.
        let test_found = search_dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .any(|dir| candidates.iter().any(|name| dir.join(name).exists()));
        if test_found {
            return Ok(issues);
        }

        // No test file: only worth flagging when the module exposes enough
        // public surface. Top-level functions only; methods and nested
        // helpers are tested through their owners.
        let mut public_count = 0;
        if let Some(suite) = &unit.suite {
            for stmt in suite {
                if let Some(func) = as_function(stmt) {
                    if !func.name.starts_with('_') {
                        public_count += 1;
                    }
                }
            }
        }

        if public_count >= MIN_TESTWORTHY_FUNCTIONS {
            let rel_path = unit
                .file
                .strip_prefix(root)
                .unwrap_or(&unit.file)
                .to_string_lossy()
                .into_owned();
            issues.push(
                Issue::new(
                    self.category(),
                    severity,
                    1,
                    format!(
                        "No test file found for {module_name} ({public_count} public functions)"
                    ),
                )
                .with_detail("module_path", rel_path)
                .with_detail("module_name", module_name)
                .with_detail("public_function_count", public_count),
            );
        }

        Ok(issues)
    }
}
