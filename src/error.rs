//! Error types for the type registry and the standard-library bootstrap.
//!
//! ## Layers
//!
//! - [`InvariantError`]: the built-in hierarchy or a layout is inconsistent. Always fatal.
//! - [`DeclarationError`]: a declaration conflicts with what the registry already holds.
//! - [`CollectError`]: a [`DeclarationError`] plus the source span that caused it (visitor output).
//! - [`SyntaxError`]: a declaration file failed to lex or parse.
//! - [`BootstrapError`]: anything that aborts [`load_stdlib`](crate::bootstrap::load_stdlib).
//!
//! User-facing errors derive [`miette::Diagnostic`] so the CLI can render them with source excerpts.

use std::io;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use quartz_core::lang::repr::ReprId;
use quartz_syntax::ast::Span;
use thiserror::Error;

/// The type lattice or a layout is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InvariantError {
    #[error("primitive `{name}` declares {declared} bytes but `{repr}` occupies {expected}")]
    #[diagnostic(code(quartz::invariant::layout))]
    LayoutMismatch {
        name: String,
        repr: ReprId,
        declared: u32,
        expected: u32,
    },

    #[error("`{name}` depends on `{dependency}`, which is not registered")]
    #[diagnostic(code(quartz::invariant::missing_dependency))]
    MissingDependency { name: String, dependency: String },

    #[error("inheritance cycle through `{name}`")]
    #[diagnostic(code(quartz::invariant::cycle))]
    Cycle { name: String },

    #[error("`{name}` does not reach `Object`")]
    #[diagnostic(code(quartz::invariant::orphan))]
    Orphan { name: String },

    #[error("`{name}` has no superclass but only `Object` may be a root")]
    #[diagnostic(code(quartz::invariant::multiple_roots))]
    MultipleRoots { name: String },

    #[error("unsupported pointer size {size} (expected 4 or 8)")]
    #[diagnostic(code(quartz::invariant::target))]
    UnsupportedPointerSize { size: u32 },
}

/// A declaration conflicts with the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("`{name}` is already defined ({existing})")]
    AlreadyDefined { name: String, existing: &'static str },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("`{name}` is not a class and cannot be inherited from")]
    NotAClass { name: String },

    #[error("`{name}` is not a module and cannot be included")]
    NotAModule { name: String },

    #[error("superclass mismatch for `{name}`: declared `{existing}`, now `{stated}`")]
    SuperclassMismatch {
        name: String,
        existing: String,
        stated: String,
    },

    #[error("method `{method}` is already defined on `{owner}`")]
    DuplicateMethod { owner: String, method: String },

    #[error("`{module}` is already included in `{owner}`")]
    DuplicateInclude { owner: String, module: String },

    #[error("module `{name}` cannot include itself")]
    SelfInclude { name: String },

    #[error("`{name}` is not a generic container")]
    NotGeneric { name: String },

    #[error("unknown representation `{repr}`")]
    UnknownRepr { repr: String },

    #[error(transparent)]
    Layout(#[from] InvariantError),
}

/// Visitor failure: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectError {
    pub error: DeclarationError,
    pub span: Span,
}

impl CollectError {
    pub fn new(error: DeclarationError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for CollectError {}

/// A declaration file failed to lex or parse.
///
/// The first problem in the file is the primary error; the others ride along as related diagnostics.
#[derive(Debug, Error, Diagnostic)]
#[error("{}:{}:{}: {}", .file.display(), .line, .column, .message)]
#[diagnostic(code(quartz::syntax))]
pub struct SyntaxError {
    pub file: PathBuf,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
    pub message: String,
    #[help]
    pub help: Option<String>,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
    #[related]
    pub related: Vec<SyntaxError>,
}

/// Anything that aborts the standard-library bootstrap.
#[derive(Debug, Error, Diagnostic)]
pub enum BootstrapError {
    #[error("cannot load standard library: {}", .path.display())]
    #[diagnostic(code(quartz::bootstrap::io))]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot locate the standard library")]
    #[diagnostic(
        code(quartz::bootstrap::stdlib_not_found),
        help("set QUARTZ_STDLIB or pass --stdlib-root")
    )]
    StdlibNotFound,

    #[error("standard library root `{}` is not a directory", .path.display())]
    #[diagnostic(code(quartz::bootstrap::stdlib_not_found))]
    StdlibRootMissing { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("{}: {}", .file.display(), .error)]
    #[diagnostic(code(quartz::bootstrap::declaration))]
    Declaration {
        file: PathBuf,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: SourceSpan,
        error: DeclarationError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invariant(#[from] InvariantError),

    #[error("type registry is unusable after a failed standard-library bootstrap")]
    #[diagnostic(code(quartz::bootstrap::poisoned))]
    InvalidRegistry,
}

/// Convert a syntax span into a miette span.
pub(crate) fn source_span(span: Span) -> SourceSpan {
    SourceSpan::from((span.start, span.len()))
}
