//! Lexer for Quartz declaration files.
//!
//! Handles tokenization of:
//! - Keywords (`class`, `module`, `lib`, `primitive`, `def`, `fun`, `include`, `end`)
//! - Identifiers (optionally suffixed with `?` or `!`), integers, and string literals
//! - Punctuation and operator runs (operators may name methods)
//! - Significant newlines and `#` comments

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use quartz_core::lang::punctuation;

/// Lexer for declaration source code.
///
/// Converts source text into a stream of tokens. Errors are accumulated so one pass reports every bad
/// character or literal in the file.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Character after the next one, without consuming anything.
    fn peek_second(&self) -> Option<char> {
        self.source[self.current_pos..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let (i, c) = self.chars.next()?;
        self.current_pos = i + c.len_utf8();
        Some(c)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn scan_token(&mut self) {
        let start = self.current_pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' => {}
            '\n' => self.add_token(TokenKind::Newline, start),
            '#' => self.skip_comment(),
            '"' => self.scan_string(start),
            c if c.is_ascii_digit() => self.scan_integer(start),
            c if is_ident_start(c) => self.scan_identifier(start),
            c if is_operator_char(c) => self.scan_operator(start),
            c => match punctuation::from_char(c) {
                Some(id) => self.add_token(TokenKind::Punctuation(id), start),
                None => self.errors.push(CompileError::lexical(
                    format!("unexpected character '{c}'"),
                    Span::new(start, self.current_pos),
                )),
            },
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        // `empty?` and `push!` are method names; `a!=b` is not a suffix.
        let mut suffixed = false;
        if matches!(self.peek(), Some('?') | Some('!')) && self.peek_second() != Some('=') {
            self.advance();
            suffixed = true;
        }

        let spelling = &self.source[start..self.current_pos];
        match keyword_id(spelling) {
            Some(id) if !suffixed => self.add_token(TokenKind::Keyword(id), start),
            _ => self.add_token(TokenKind::Ident(spelling.to_string()), start),
        }
    }

    fn scan_integer(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let digits: String = self.source[start..self.current_pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        match digits.parse::<u64>() {
            Ok(value) => self.add_token(TokenKind::Int(value), start),
            Err(_) => self.errors.push(CompileError::lexical(
                format!("integer literal '{digits}' is out of range"),
                Span::new(start, self.current_pos),
            )),
        }
    }

    fn scan_string(&mut self, start: usize) {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.errors.push(
                        CompileError::lexical("unterminated string literal", Span::new(start, self.current_pos))
                            .with_hint("string literals must close on the line they start"),
                    );
                    return;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.current_pos;
                    self.advance();
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('\\') => value.push('\\'),
                        Some('"') => value.push('"'),
                        Some(other) => self.errors.push(CompileError::lexical(
                            format!("unknown escape sequence '\\{other}'"),
                            Span::new(escape_start, self.current_pos),
                        )),
                        None => {}
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        self.add_token(TokenKind::String(value), start);
    }

    fn scan_operator(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_operator_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        let op = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Operator(op), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~')
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
