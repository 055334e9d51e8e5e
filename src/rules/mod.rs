// Rules module
// Each submodule implements one structural detector.

/// Comment marker scanner (TODO/FIXME/... markers).
pub mod todos;

/// Stub body detection (pass, ellipsis, NotImplementedError).
pub mod stubs;

/// Placeholder return detection.
pub mod returns;

/// Incomplete documented methods.
pub mod incomplete;

/// Docstring coverage and function/class metrics.
pub mod docstrings;

/// Suspiciously short functions.
pub mod short;

/// Abstract method completeness.
pub mod abstracts;

/// Type-hint gaps.
pub mod hints;

/// Test coverage gaps.
pub mod coverage;

use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::source::SourceUnit;
use anyhow::Result;

/// A single structural detector.
///
/// Detectors are stateless and read the same immutable `SourceUnit`; they
/// emit issues and may accumulate metrics. They must be deterministic: two
/// runs over the same unit produce identical output.
pub trait Detector {
    /// Category of issues this detector emits.
    fn category(&self) -> Category;

    /// Runs the detector against a parseable unit. An `Err` here is
    /// isolated at the pipeline boundary and does not affect other
    /// detectors.
    fn run(&self, unit: &SourceUnit, ctx: &ScanContext, metrics: &mut Metrics)
        -> Result<Vec<Issue>>;
}

/// All detectors, in their fixed invocation order. Issue insertion order in
/// a scan result follows this ordering.
pub fn registry() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(todos::TodoScanner),
        Box::new(stubs::StubDetector),
        Box::new(returns::SimpleReturnDetector),
        Box::new(incomplete::IncompleteMethodDetector),
        Box::new(docstrings::DocstringDetector),
        Box::new(short::ShortFunctionDetector),
        Box::new(abstracts::AbstractMethodDetector),
        Box::new(hints::TypeHintDetector),
        Box::new(coverage::TestGapDetector),
    ]
}
