//! Declaration-file parser adapter for the bootstrap pipeline.

use std::path::Path;

use miette::NamedSource;

use crate::bootstrap::SourceParser;
use crate::error::{SyntaxError, source_span};
use crate::frontend::ast::Program;
use crate::frontend::diagnostics::{CompileError, line_col};

/// Lexes and parses `.qz` declaration files with `quartz_syntax`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclParser;

impl DeclParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for DeclParser {
    type Tree = Program;

    #[tracing::instrument(skip_all, fields(file = %file.display()))]
    fn parse(&mut self, file: &Path, source: &str) -> Result<Program, SyntaxError> {
        quartz_syntax::parse_source(source).map_err(|errors| syntax_error(file, source, errors))
    }
}

/// Fold every lexer/parser error of a file into one [`SyntaxError`]; the first is primary.
pub fn syntax_error(file: &Path, source: &str, errors: Vec<CompileError>) -> SyntaxError {
    let mut errors = errors.into_iter().map(|err| single(file, source, err));
    match errors.next() {
        Some(mut primary) => {
            primary.related = errors.collect();
            primary
        }
        // A failed parse carries at least one error.
        None => single(file, source, CompileError::new("invalid declaration file", Default::default())),
    }
}

fn single(file: &Path, source: &str, err: CompileError) -> SyntaxError {
    let (line, column) = line_col(source, err.span.start);
    SyntaxError {
        file: file.to_path_buf(),
        line,
        column,
        message: err.to_string(),
        help: (!err.hints.is_empty()).then(|| err.hints.join("\n")),
        src: NamedSource::new(file.display().to_string(), source.to_string()),
        span: source_span(err.span),
        related: Vec::new(),
    }
}
