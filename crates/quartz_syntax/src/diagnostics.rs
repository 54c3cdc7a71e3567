//! Diagnostics for the declaration frontend.

use thiserror::Error;

use crate::ast::Span;

/// A lexer or parser error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Syntax,
            hints: Vec::new(),
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            ..Self::new(message, span)
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// 1-based line and column of a byte offset.
///
/// Offsets past the end of `source` clamp to the end.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    let column = source[line_start..offset].chars().count() + 1;
    (line, column)
}

/// Render an error as `file:line:col: kind: message`, one hint per following line.
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let (line, col) = line_col(source, error.span.start);
    let mut out = format!("{file_name}:{line}:{col}: {error}");
    for hint in &error.hints {
        out.push_str("\n  = hint: ");
        out.push_str(hint);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        let src = "class A\nend\n";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 6), (1, 7));
        assert_eq!(line_col(src, 8), (2, 1));
        assert_eq!(line_col(src, 999), (3, 1));
    }

    #[test]
    fn format_error_includes_location_and_hints() {
        let src = "\n\nclass\n";
        let err = CompileError::new("expected a type name", Span::new(7, 7)).with_hint("type names are capitalized");
        let rendered = format_error("std/foo.qz", src, &err);
        assert_eq!(
            rendered,
            "std/foo.qz:3:6: syntax error: expected a type name\n  = hint: type names are capitalized"
        );
    }
}
