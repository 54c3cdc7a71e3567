//! Parser for Quartz declaration files
//!
//! Converts a token stream into a [`Program`] of class, module, lib, primitive, and method declarations.
//!
//! ## Examples
//!
//! ```rust
//! use quartz_syntax::{lexer, parser};
//!
//! let source = "lib LibM(\"m\")\n  fun sqrt(x : Float) : Float\nend\n";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert_eq!(ast.declarations.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use quartz_core::lang::keywords::{self, KeywordId};
use quartz_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
