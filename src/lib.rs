#![forbid(unsafe_code)]
//! Quartz compiler front end: type registry and standard-library bootstrap
//!
//! Every compilation owns one [`TypeRegistry`]. Construction registers the closed builtin set (the
//! `Object`-rooted class hierarchy, primitive machine types and the generic `Array` with its `ARGV`
//! specialization); the bootstrap pipeline then optionally parses and collects standard-library declaration
//! files into the same registry before semantic analysis starts.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod frontend;
pub mod registry;
pub mod types;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;

pub use bootstrap::{LoadReport, LoadStd, SourceParser, TypeVisitor, bootstrap, load_stdlib};
pub use config::CompilerOptions;
pub use error::{BootstrapError, CollectError, DeclarationError, InvariantError, SyntaxError};
pub use registry::{MethodMatch, Owner, TypeRegistry};
pub use types::{MethodSig, Param, Type, TypeId, TypeKind, TypeRef};
