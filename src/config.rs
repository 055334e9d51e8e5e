use crate::issue::{Category, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Immutable configuration snapshot for a scan.
///
/// Built once before the scan starts and shared read-only across all
/// workers. Every field has a default, so a partial config file only
/// overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Functions shorter than this (in lines, docstring excluded) are
    /// reported as suspiciously short.
    pub min_function_lines: usize,
    /// Minimum trimmed docstring length (in characters) to count as
    /// documented.
    pub min_docstring_length: usize,
    /// Function/method names exempt from body-shape and documentation
    /// checks, matched verbatim.
    pub ignore_functions: HashSet<String>,
    /// Glob patterns for paths excluded from discovery. Consumed by the
    /// scanner, not by individual detectors.
    pub ignore_patterns: Vec<String>,
    /// Category-to-severity overrides. Categories absent here use the
    /// compiled-in default table.
    pub severity_levels: HashMap<Category, Severity>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_function_lines: 5,
            min_docstring_length: 15,
            ignore_functions: ["__init__", "__str__", "__repr__"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_patterns: [
                "__pycache__/*",
                "*.pyc",
                ".git/*",
                ".venv/*",
                "venv/*",
                "env/*",
                "node_modules/*",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            severity_levels: HashMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file, falling back to defaults when
    /// the file is missing or malformed. Config problems are never fatal.
    pub fn load(path: Option<&Path>) -> Config {
        let Some(path) = path else {
            return Config::default();
        };
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str::<Config>(&text).map_err(Into::into));
        match parsed {
            Ok(config) => {
                log::info!("loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!(
                    "failed to load config from {}: {err}; using defaults",
                    path.display()
                );
                Config::default()
            }
        }
    }

    /// Severity for a category: user override if present, default table
    /// otherwise.
    pub fn severity_of(&self, category: Category) -> Severity {
        self.severity_levels
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_severity())
    }

    pub fn is_ignored_function(&self, name: &str) -> bool {
        self.ignore_functions.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severity_table() {
        let config = Config::default();
        assert_eq!(config.severity_of(Category::SyntaxErrors), Severity::Critical);
        assert_eq!(
            config.severity_of(Category::UnimplementedAbstracts),
            Severity::Critical
        );
        assert_eq!(config.severity_of(Category::Stubs), Severity::Serious);
        assert_eq!(config.severity_of(Category::TestGaps), Severity::Serious);
        assert_eq!(config.severity_of(Category::Todos), Severity::Minor);
        assert_eq!(config.severity_of(Category::TypeHintGaps), Severity::Minor);
    }

    #[test]
    fn test_severity_override() {
        let json = r#"{"severity_levels": {"todos": "critical"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.severity_of(Category::Todos), Severity::Critical);
        // Unmentioned categories keep the default table.
        assert_eq!(config.severity_of(Category::Stubs), Severity::Serious);
        // Unmentioned fields keep their defaults.
        assert_eq!(config.min_function_lines, 5);
        assert!(config.is_ignored_function("__init__"));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = Config::load(Some(Path::new("/nonexistent/pydoctor.json")));
        assert_eq!(config.min_docstring_length, 15);
    }
}
