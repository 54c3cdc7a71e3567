//! Standard-library bootstrap.
//!
//! Resolves a [`LoadStd`] configuration to an ordered file list and feeds each file through a
//! [`SourceParser`] and a fresh [`TypeVisitor`] against one [`TypeRegistry`]. Ingestion is strictly sequential;
//! the first failure aborts the whole run and poisons the registry.
//!
//! ## Examples
//! ```rust
//! use quartz::bootstrap::{LoadStd, bootstrap};
//! use quartz::config::CompilerOptions;
//!
//! let registry = bootstrap(&CompilerOptions::new().with_load_std(LoadStd::None)).unwrap();
//! assert_eq!(registry.len(), 14);
//! ```

pub mod stdlib;

use std::fs;
use std::path::{Path, PathBuf};

use miette::NamedSource;

use crate::config::CompilerOptions;
use crate::error::{BootstrapError, CollectError, SyntaxError, source_span};
use crate::frontend::collect::TypeCollector;
use crate::frontend::parse::DeclParser;
use crate::registry::TypeRegistry;

pub use stdlib::Stdlib;

/// Which standard-library files to ingest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStd {
    /// Nothing; the registry keeps only the builtins.
    #[default]
    None,
    /// Every source file under the root, recursively, sorted by path.
    All,
    /// `root/<name>.qz`.
    Name(String),
    /// `root/<name>.qz` for each name, in the given order.
    Names(Vec<String>),
}

impl LoadStd {
    /// Parse CLI values: `all`, `none`, or file names (repeatable).
    pub fn from_args(values: &[String]) -> Self {
        match values {
            [] => LoadStd::None,
            [one] if one == "all" => LoadStd::All,
            [one] if one == "none" => LoadStd::None,
            [one] => LoadStd::Name(one.clone()),
            many => LoadStd::Names(many.to_vec()),
        }
    }
}

impl From<bool> for LoadStd {
    fn from(all: bool) -> Self {
        if all { LoadStd::All } else { LoadStd::None }
    }
}

impl From<&str> for LoadStd {
    fn from(name: &str) -> Self {
        LoadStd::Name(name.to_string())
    }
}

impl From<String> for LoadStd {
    fn from(name: String) -> Self {
        LoadStd::Name(name)
    }
}

impl From<Vec<String>> for LoadStd {
    fn from(names: Vec<String>) -> Self {
        LoadStd::Names(names)
    }
}

impl From<&[&str]> for LoadStd {
    fn from(names: &[&str]) -> Self {
        LoadStd::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<T: Into<LoadStd>> From<Option<T>> for LoadStd {
    fn from(value: Option<T>) -> Self {
        value.map_or(LoadStd::None, Into::into)
    }
}

/// Turns source text into a syntax tree. Must not touch any registry.
pub trait SourceParser {
    type Tree;

    fn parse(&mut self, file: &Path, source: &str) -> Result<Self::Tree, SyntaxError>;
}

/// Walks one syntax tree and records its declarations in the registry.
///
/// A fresh visitor is created for every file.
pub trait TypeVisitor {
    type Tree;

    fn visit(&mut self, registry: &mut TypeRegistry, root: &Self::Tree) -> Result<(), CollectError>;
}

/// What a successful [`load_stdlib`] ingested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Files in ingestion order.
    pub files: Vec<PathBuf>,
    /// Registry entries added by those files.
    pub types_added: usize,
}

/// Ordered list of files `load` selects. `LoadStd::None` resolves to nothing without locating the stdlib.
pub fn resolve_files(load: &LoadStd, stdlib_root: Option<&Path>) -> Result<Vec<PathBuf>, BootstrapError> {
    if *load == LoadStd::None {
        return Ok(Vec::new());
    }
    let stdlib = Stdlib::resolve(stdlib_root)?;
    match load {
        LoadStd::None => Ok(Vec::new()),
        LoadStd::All => stdlib.all_sources(),
        LoadStd::Name(name) => Ok(vec![stdlib.path_for(name)]),
        LoadStd::Names(names) => Ok(names.iter().map(|name| stdlib.path_for(name)).collect()),
    }
}

/// Ingest the standard-library files `options` selects into `registry`.
///
/// ## Errors
/// The first I/O, syntax or declaration error aborts the run and poisons `registry`. A registry that is
/// already poisoned is refused up front.
#[tracing::instrument(skip_all, fields(load = ?options.load_std))]
pub fn load_stdlib<P, V, F>(
    registry: &mut TypeRegistry,
    options: &CompilerOptions,
    parser: &mut P,
    mut new_visitor: F,
) -> Result<LoadReport, BootstrapError>
where
    P: SourceParser,
    V: TypeVisitor<Tree = P::Tree>,
    F: FnMut() -> V,
{
    registry.ensure_usable()?;

    let files = match resolve_files(&options.load_std, options.stdlib_root.as_deref()) {
        Ok(files) => files,
        Err(e) => {
            registry.poison();
            return Err(e);
        }
    };
    if files.is_empty() {
        if options.load_std == LoadStd::All {
            tracing::warn!("standard library root contains no source files");
        }
        return Ok(LoadReport::default());
    }

    let before = registry.len();
    for file in &files {
        if let Err(e) = ingest(registry, file, parser, new_visitor()) {
            tracing::error!(file = %file.display(), "standard library bootstrap failed");
            registry.poison();
            return Err(e);
        }
    }

    let report = LoadReport {
        files,
        types_added: registry.len() - before,
    };
    tracing::info!(
        files = report.files.len(),
        types = report.types_added,
        "standard library loaded"
    );
    Ok(report)
}

fn ingest<P, V>(registry: &mut TypeRegistry, file: &Path, parser: &mut P, mut visitor: V) -> Result<(), BootstrapError>
where
    P: SourceParser,
    V: TypeVisitor<Tree = P::Tree>,
{
    tracing::debug!(file = %file.display(), "ingesting");
    let source = fs::read_to_string(file).map_err(|source| BootstrapError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    let tree = parser.parse(file, &source)?;
    visitor
        .visit(registry, &tree)
        .map_err(|CollectError { error, span }| BootstrapError::Declaration {
            file: file.to_path_buf(),
            src: NamedSource::new(file.display().to_string(), source),
            span: source_span(span),
            error,
        })
}

/// Build a registry for `options`: builtins, the selected standard library, then a full invariant check.
pub fn bootstrap(options: &CompilerOptions) -> Result<TypeRegistry, BootstrapError> {
    let mut registry = TypeRegistry::with_target(options.target)?;
    load_stdlib(&mut registry, options, &mut DeclParser::new(), TypeCollector::new)?;
    registry.verify()?;
    Ok(registry)
}
