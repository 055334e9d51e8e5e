use crate::utils::LineIndex;
use rustpython_ast::{Mod, Stmt, TextSize};
use rustpython_parser::{lexer::lex, parse, Mode, Tok};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single comment token with its 1-indexed line number.
/// The raw text still carries the leading `#`.
#[derive(Debug, Clone)]
pub struct CommentToken {
    pub line: usize,
    pub text: String,
}

/// Recorded details of a failed parse.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// 1-indexed line of the failure.
    pub line: usize,
    /// Byte offset of the failure.
    pub offset: usize,
    /// Trimmed text of the offending line.
    pub snippet: String,
    pub message: String,
}

/// Immutable parsed representation of one source file.
///
/// Built once from raw text and consumed read-only by every detector.
/// A unit that fails to parse carries `parse_failure` instead of a suite;
/// the pipeline short-circuits on it.
pub struct SourceUnit {
    pub file: PathBuf,
    pub source: String,
    /// Source split into lines; line `n` is `lines[n - 1]`.
    pub lines: Vec<String>,
    /// Top-level statement suite, absent when the source is invalid.
    pub suite: Option<Vec<Stmt>>,
    /// Comment token stream, in source order. Empty for invalid units.
    pub comments: Vec<CommentToken>,
    pub parse_failure: Option<ParseFailure>,
    line_index: LineIndex,
}

impl SourceUnit {
    /// Reads and parses a file. The file handle is released as soon as the
    /// read completes; decoding is lossy, matching the behavior of reading
    /// with replacement characters.
    pub fn load(path: &Path) -> io::Result<SourceUnit> {
        let bytes = fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::from_source(path.to_path_buf(), source))
    }

    /// Builds a unit from in-memory source. Never fails: a syntax error is
    /// recorded in `parse_failure` rather than returned.
    pub fn from_source(file: PathBuf, source: String) -> SourceUnit {
        let line_index = LineIndex::new(&source);
        let lines: Vec<String> = source.lines().map(|l| l.to_string()).collect();
        let file_label = file.to_string_lossy().into_owned();

        let (suite, parse_failure) = match parse(&source, Mode::Module, &file_label) {
            Ok(Mod::Module(module)) => (Some(module.body), None),
            Ok(_) => (Some(Vec::new()), None),
            Err(err) => {
                let line = line_index.line_index(err.offset);
                let snippet = lines
                    .get(line.saturating_sub(1))
                    .map(|l| l.trim().to_string())
                    .unwrap_or_default();
                let failure = ParseFailure {
                    line,
                    offset: err.offset.to_usize(),
                    snippet,
                    message: err.error.to_string(),
                };
                (None, Some(failure))
            }
        };

        // The comment stream is only meaningful for parseable units; the
        // pipeline never reaches the marker scanner otherwise.
        let comments = if parse_failure.is_none() {
            collect_comments(&source, &line_index, &file_label)
        } else {
            Vec::new()
        };

        SourceUnit {
            file,
            source,
            lines,
            suite,
            comments,
            parse_failure,
            line_index,
        }
    }

    /// Maps a byte offset from the AST to a 1-indexed line number.
    pub fn line_of(&self, offset: TextSize) -> usize {
        self.line_index.line_index(offset)
    }

    pub fn is_valid(&self) -> bool {
        self.parse_failure.is_none()
    }
}

/// Runs the lexer over the source and keeps only comment tokens.
///
/// A lexer error is a detector-internal condition: it is logged and the
/// comments gathered so far are kept.
fn collect_comments(source: &str, line_index: &LineIndex, file_label: &str) -> Vec<CommentToken> {
    let mut comments = Vec::new();
    for item in lex(source, Mode::Module) {
        match item {
            Ok((Tok::Comment(text), range)) => comments.push(CommentToken {
                line: line_index.line_index(range.start()),
                text,
            }),
            Ok(_) => {}
            Err(err) => {
                log::debug!("lexer error in {file_label}: {err:?}");
                break;
            }
        }
    }
    comments
}
