//! Token types for the declaration lexer.
//!
//! Keywords and punctuation carry registry-backed IDs from `quartz_core::lang`, so the parser never compares
//! spellings.

use crate::ast::Span;
use quartz_core::lang::keywords::{self, KeywordId};
use quartz_core::lang::punctuation::{self, PunctuationId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Punctuation(PunctuationId),
    /// A run of operator characters, e.g. `<`, `==`, `<=>`.
    Operator(String),

    Ident(String),
    Int(u64),
    String(String),

    Newline,
    Eof,
}

impl TokenKind {
    /// Human-readable description for "expected ..., found ..." messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("keyword `{}`", keywords::as_str(*id)),
            TokenKind::Punctuation(id) => format!("`{}`", punctuation::as_str(*id)),
            TokenKind::Operator(op) => format!("operator `{op}`"),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Int(value) => format!("integer `{value}`"),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
