//! Quartz language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords and punctuation of the
//! declaration syntax, backend representation tags, builtin type names, and standard-library layout.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler and tooling. Callers
//! work with **stable IDs** (e.g. `KeywordId`, `ReprId`, `BuiltinTypeId`) and look up spellings/metadata
//! via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use.
//!
//! ## Examples
//! ```rust
//! use quartz_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("class"), Some(KeywordId::Class));
//! assert_eq!(keywords::as_str(KeywordId::End), "end");
//! ```
//!
//! ## See also
//! - `cargo run -p quartz_core --bin generate_lang_reference` to generate Markdown reference tables.

pub mod keywords;
pub mod punctuation;
pub mod repr;
pub mod stdlib;
pub mod types;
