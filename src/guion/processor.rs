//! Analysis orchestration for Guion sources.
//!
//! This module ties the pipeline together: frame the source if it lacks a
//! program header, tokenize, parse, and render the four artifacts. All run
//! state (tokens, diagnostics, tree) is created fresh per call, so
//! concurrent analyses never share or corrupt each other's accumulators.
//!
//! File handling lives at the edge: reading the input and writing the
//! artifact files are the only places this crate touches the filesystem,
//! and both report failures as [`AnalyzeError::Io`].

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::guion::ast::Program;
use crate::guion::diagnostics::Diagnostic;
use crate::guion::formats::{listing, table, trace, treeviz};
use crate::guion::lexer::{self, Token};
use crate::guion::parser::{self, ParseFailure};

/// Artifact file names, fixed for interoperability with the tooling that
/// consumes them.
pub const LISTING_FILE: &str = "progfte.tok";
pub const TABLE_FILE: &str = "progfte.tab";
pub const TRACE_FILE: &str = "progfte.dep";
pub const TREE_FILE: &str = "progfte.arb";

/// Fallback artifact directory, used when the input has no parent directory.
pub const FALLBACK_DIR: &str = "salida";

/// The complete result of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub token_listing: String,
    pub token_table: String,
    pub debug_trace: String,
    pub tree_dump: String,
    pub program: Program,
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Errors that can end an analysis without a result.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    /// Strict-mode syntax failure, with line and source context.
    Syntax(ParseFailure),
    /// Unreadable source or unwritable destination.
    Io(String),
}

impl std::error::Error for AnalyzeError {}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Syntax(failure) => write!(f, "{}", failure),
            AnalyzeError::Io(message) => write!(f, "IO error: {}", message),
        }
    }
}

/// Analyze a source text in the default tolerant discipline.
///
/// Never fails: lexical and syntactic anomalies are recovered into
/// diagnostics and the four artifacts are always produced, over malformed
/// programs included.
pub fn analyze(source: &str) -> Analysis {
    let framed = ensure_program_frame(source);
    let (tokens, mut diagnostics) = lexer::tokenize(&framed);
    let (program, syntax_diagnostics) = parser::parse(&tokens);
    diagnostics.extend(syntax_diagnostics);
    finish(tokens, program, diagnostics)
}

/// Analyze a source text in the strict discipline: the first syntax error
/// aborts the run with line and source-line context.
pub fn analyze_strict(source: &str) -> Result<Analysis, AnalyzeError> {
    let framed = ensure_program_frame(source);
    let (tokens, diagnostics) = lexer::tokenize(&framed);
    let program = parser::parse_strict(&tokens, &framed).map_err(AnalyzeError::Syntax)?;
    Ok(finish(tokens, program, diagnostics))
}

/// Read and analyze a file (tolerant discipline).
pub fn analyze_file(path: &Path) -> Result<Analysis, AnalyzeError> {
    let source = fs::read_to_string(path)
        .map_err(|e| AnalyzeError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    Ok(analyze(&source))
}

fn finish(tokens: Vec<Token>, program: Program, diagnostics: Vec<Diagnostic>) -> Analysis {
    let token_listing = listing::render(&tokens);
    let token_table = table::render(&tokens);
    let debug_trace = trace::render(&tokens);
    let tree_dump = treeviz::render(&program);
    Analysis {
        token_listing,
        token_table,
        debug_trace,
        tree_dump,
        program,
        tokens,
        diagnostics,
    }
}

/// Wrap a headerless source in the minimal program skeleton.
///
/// Sources that already start with the `Script` header pass through
/// untouched; anything else is framed as the body of a synthetic program so
/// the parser always sees a complete unit.
pub fn ensure_program_frame(source: &str) -> Cow<'_, str> {
    if begins_with_header(source) {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(format!("Script Principal\nInicio\n{}\nFin\n", source))
    }
}

/// Whether the first meaningful word of the source is the header keyword.
fn begins_with_header(source: &str) -> bool {
    for line in source.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        return line.split_whitespace().next() == Some("Script");
    }
    false
}

/// Destination directory for the artifacts of a given input file: the
/// directory containing the input when it has one, else [`FALLBACK_DIR`].
pub fn artifact_dir_for(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from(FALLBACK_DIR),
    }
}

/// Write the four artifact files into `dir`, creating it if absent.
pub fn write_artifacts(dir: &Path, analysis: &Analysis) -> Result<(), AnalyzeError> {
    fs::create_dir_all(dir)
        .map_err(|e| AnalyzeError::Io(format!("failed to create {}: {}", dir.display(), e)))?;
    for (name, content) in [
        (LISTING_FILE, &analysis.token_listing),
        (TABLE_FILE, &analysis.token_table),
        (TRACE_FILE, &analysis.debug_trace),
        (TREE_FILE, &analysis.tree_dump),
    ] {
        let path = dir.join(name);
        fs::write(&path, content)
            .map_err(|e| AnalyzeError::Io(format!("failed to write {}: {}", path.display(), e)))?;
    }
    Ok(())
}
