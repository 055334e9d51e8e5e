// Lib file to expose modules for testing and external usage.
// This file serves as the root for the library crate.

/// Module defining the configuration snapshot shared across a scan.
pub mod config;

/// Module defining the issue taxonomy, metrics, and per-unit scan results.
pub mod issue;

/// Module defining the immutable per-file source representation
/// (raw text, lines, syntax tree, comment tokens).
pub mod source;

/// Module containing the per-unit diagnostic pipeline and scan context.
pub mod pipeline;

/// Module containing the multi-unit scan orchestrator.
pub mod scanner;

/// Module containing the structural detectors and their registry.
pub mod rules;

/// Module containing shared utilities: line indexing and AST view helpers.
pub mod utils;
