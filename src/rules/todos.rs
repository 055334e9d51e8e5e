use crate::issue::{Category, Issue, Metrics};
use crate::pipeline::ScanContext;
use crate::rules::Detector;
use crate::source::SourceUnit;
use crate::utils::truncate_chars;
use anyhow::Result;
use regex::Regex;

/// Comment-derived messages are capped at this many characters.
pub const MAX_COMMENT_MESSAGE_LEN: usize = 100;

lazy_static::lazy_static! {
    /// Technical debt markers, in precedence order. The first marker that
    /// matches a comment wins; at most one issue is emitted per comment.
    /// Matching is case-insensitive on word boundaries.
    pub static ref MARKER_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bTODO\b").unwrap(), "Action Required"),
        (Regex::new(r"(?i)\bFIXME\b").unwrap(), "Critical Fix Needed"),
        (Regex::new(r"(?i)\bHACK\b").unwrap(), "Technical Debt"),
        (Regex::new(r"(?i)\bXXX\b").unwrap(), "Urgent Review"),
        (Regex::new(r"(?i)\bNOTE\b").unwrap(), "Important Note"),
        (Regex::new(r"(?i)\bTEMP\b").unwrap(), "Temporary Code"),
        (Regex::new(r"(?i)\bWIP\b").unwrap(), "Work In Progress"),
    ];
}

/// Scans the raw comment token stream for technical debt markers.
///
/// Works on tokens rather than the tree, so markers are caught in comments
/// anywhere: module scope, inside function bodies, trailing a statement.
pub struct TodoScanner;

impl Detector for TodoScanner {
    fn category(&self) -> Category {
        Category::Todos
    }

    fn run(
        &self,
        unit: &SourceUnit,
        ctx: &ScanContext,
        _metrics: &mut Metrics,
    ) -> Result<Vec<Issue>> {
        let severity = ctx.config.severity_of(self.category());
        let mut issues = Vec::new();

        for comment in &unit.comments {
            for (pattern, marker_label) in MARKER_PATTERNS.iter() {
                if pattern.is_match(&comment.text) {
                    let clean = comment.text.trim_start_matches('#').trim();
                    issues.push(
                        Issue::new(
                            self.category(),
                            severity,
                            comment.line,
                            truncate_chars(clean, MAX_COMMENT_MESSAGE_LEN),
                        )
                        .with_detail("marker_type", *marker_label)
                        .with_detail("full_comment", clean),
                    );
                    // First matching marker wins; one issue per comment.
                    break;
                }
            }
        }

        Ok(issues)
    }
}
