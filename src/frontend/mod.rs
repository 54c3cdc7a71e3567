//! Quartz declaration frontend
//!
//! - `lexer`, `parser`, `ast`, `diagnostics`: provided by the shared `quartz_syntax` crate
//! - `parse`: the [`SourceParser`](crate::bootstrap::SourceParser) used by the bootstrap
//! - `collect`: the [`TypeVisitor`](crate::bootstrap::TypeVisitor) that records declarations in the registry

// Syntax components are provided by the shared quartz_syntax crate.
pub use quartz_syntax::{ast, diagnostics, lexer, parser};

pub mod collect;
pub mod parse;
