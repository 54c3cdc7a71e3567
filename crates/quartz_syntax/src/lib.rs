//! Declaration-file frontend for Quartz: lexer, parser, AST, diagnostics.
//!
//! Standard-library sources are declaration files: classes, modules, foreign-library bindings, primitive
//! types and method signatures, with no executable bodies. This crate turns their text into a [`ast::Program`].
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not resolve names or touch the type registry.
//! - Vocabulary identity (keywords/punctuation) comes from `quartz_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use quartz_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("class Bar\nend\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.declarations.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

/// Lex and parse a declaration file in one step.
///
/// ## Errors
/// Returns every lexer error if lexing fails, otherwise every parser error.
pub fn parse_source(source: &str) -> Result<ast::Program, Vec<diagnostics::CompileError>> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}
