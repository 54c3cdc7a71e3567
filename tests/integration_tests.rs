//! Integration tests for the type registry and the standard-library bootstrap

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use quartz::bootstrap::{LoadStd, SourceParser, TypeVisitor, bootstrap, load_stdlib};
use quartz::config::CompilerOptions;
use quartz::error::{BootstrapError, CollectError, DeclarationError, SyntaxError};
use quartz::frontend::collect::TypeCollector;
use quartz::frontend::parse::DeclParser;
use quartz::registry::{Owner, TypeRegistry};
use quartz::types::TypeRef;
use quartz_core::Target;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Scratch stdlib directory populated with `(relative path, source)` pairs.
fn stdlib_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, source) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, source).unwrap();
    }
    dir
}

fn options(dir: &TempDir, load: impl Into<LoadStd>) -> CompilerOptions {
    CompilerOptions::new().with_load_std(load).with_stdlib_root(dir.path())
}

fn shipped_stdlib() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("std")
}

/// Parser/visitor pair that only records what the pipeline asks of them.
#[derive(Default, Clone)]
struct Calls {
    parsed: Rc<RefCell<Vec<String>>>,
    visited: Rc<RefCell<Vec<String>>>,
}

struct RecordingParser(Calls);

impl SourceParser for RecordingParser {
    type Tree = String;

    fn parse(&mut self, file: &Path, _source: &str) -> Result<String, SyntaxError> {
        let stem = file.file_stem().unwrap().to_string_lossy().into_owned();
        self.0.parsed.borrow_mut().push(stem.clone());
        Ok(stem)
    }
}

struct RecordingVisitor(Calls);

impl TypeVisitor for RecordingVisitor {
    type Tree = String;

    fn visit(&mut self, _registry: &mut TypeRegistry, root: &String) -> Result<(), CollectError> {
        self.0.visited.borrow_mut().push(root.clone());
        Ok(())
    }
}

fn record(registry: &mut TypeRegistry, options: &CompilerOptions) -> (Result<usize, BootstrapError>, Calls) {
    let calls = Calls::default();
    let mut parser = RecordingParser(calls.clone());
    let factory_calls = calls.clone();
    let result = load_stdlib(registry, options, &mut parser, || RecordingVisitor(factory_calls.clone()))
        .map(|report| report.files.len());
    (result, calls)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_fresh_registry_has_the_builtin_set() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.len(), 14);
    assert_eq!(registry.get(registry.int()).name, "Int");
    assert_eq!(registry.lookup("void"), None);
    assert!(registry.void().is_void());
    assert!(registry.verify().is_ok());
}

#[test]
fn test_loading_nothing_does_not_parse_or_visit() {
    let mut registry = TypeRegistry::new();
    let options = CompilerOptions::new()
        .with_load_std(false)
        .with_stdlib_root("/this/path/is/never/consulted");
    let (result, calls) = record(&mut registry, &options);
    assert_eq!(result.unwrap(), 0);
    assert!(calls.parsed.borrow().is_empty());
    assert!(calls.visited.borrow().is_empty());
    assert_eq!(registry.len(), 14);
}

#[test]
fn test_loading_one_file_declares_its_class() {
    let dir = stdlib_dir(&[("foo.qz", "class Bar\nend\n")]);
    let registry = bootstrap(&options(&dir, "foo")).unwrap();
    assert_eq!(registry.len(), 15);
    let bar = registry.lookup("Bar").unwrap();
    assert_eq!(registry.superclass(bar), Some(registry.object()));
}

#[test]
fn test_syntax_error_aborts_and_poisons() {
    let source = "class Bar\nend\nclass Baz <\nend\n";
    let dir = stdlib_dir(&[("foo.qz", source)]);
    let mut registry = TypeRegistry::new();

    let err = load_stdlib(
        &mut registry,
        &options(&dir, "foo"),
        &mut DeclParser::new(),
        TypeCollector::new,
    )
    .unwrap_err();

    match &err {
        BootstrapError::Syntax(syntax) => {
            assert_eq!(syntax.line, 3);
            assert!(syntax.file.ends_with("foo.qz"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
    assert!(registry.is_poisoned());
    assert!(matches!(registry.ensure_usable(), Err(BootstrapError::InvalidRegistry)));

    // A poisoned registry refuses further bootstrapping, even of valid files.
    let good = stdlib_dir(&[("ok.qz", "class Ok\nend\n")]);
    let again = load_stdlib(&mut registry, &options(&good, "ok"), &mut DeclParser::new(), TypeCollector::new);
    assert!(matches!(again, Err(BootstrapError::InvalidRegistry)));
}

#[test]
fn test_library_manifest_skips_libs_without_a_name() {
    let source = "lib M(\"m\")\nend\nlib N\nend\nlib C(\"c\")\nend\n";
    let dir = stdlib_dir(&[("libs.qz", source)]);
    let registry = bootstrap(&options(&dir, "libs")).unwrap();
    assert_eq!(registry.library_names(), vec!["m", "c"]);
}

#[test]
fn test_named_files_load_in_the_given_order() {
    let dir = stdlib_dir(&[("a.qz", ""), ("b.qz", ""), ("c.qz", "")]);
    let mut registry = TypeRegistry::new();
    let (result, calls) = record(&mut registry, &options(&dir, vec!["b".to_string(), "a".to_string()]));
    assert_eq!(result.unwrap(), 2);
    assert_eq!(*calls.parsed.borrow(), vec!["b", "a"]);
    assert_eq!(*calls.visited.borrow(), vec!["b", "a"]);
}

#[test]
fn test_loading_everything_is_sorted_and_recursive() {
    let dir = stdlib_dir(&[
        ("zeta.qz", ""),
        ("alpha.qz", ""),
        ("nested/mid.qz", ""),
        ("README.md", "# not a source"),
    ]);
    let mut registry = TypeRegistry::new();
    let (result, calls) = record(&mut registry, &options(&dir, true));
    assert_eq!(result.unwrap(), 3);
    assert_eq!(*calls.parsed.borrow(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_empty_stdlib_loads_nothing() {
    let dir = stdlib_dir(&[]);
    let registry = bootstrap(&options(&dir, true)).unwrap();
    assert_eq!(registry.len(), 14);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = stdlib_dir(&[]);
    let mut registry = TypeRegistry::new();
    let err = load_stdlib(&mut registry, &options(&dir, "nope"), &mut DeclParser::new(), TypeCollector::new).unwrap_err();
    match err {
        BootstrapError::Io { path, .. } => assert!(path.ends_with("nope.qz")),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert!(registry.is_poisoned());
}

#[test]
fn test_declaration_error_carries_file_and_span() {
    let source = "class Int < Value\nend\n";
    let dir = stdlib_dir(&[("bad.qz", source)]);
    let err = bootstrap(&options(&dir, "bad")).unwrap_err();
    match err {
        BootstrapError::Declaration { file, span, error, .. } => {
            assert!(file.ends_with("bad.qz"));
            assert_eq!(&source[span.offset()..span.offset() + span.len()], "Value");
            assert!(matches!(error, DeclarationError::SuperclassMismatch { .. }));
        }
        other => panic!("expected a declaration error, got {other:?}"),
    }
}

#[test]
fn test_first_failure_stops_later_files() {
    let dir = stdlib_dir(&[("a.qz", "class A < Missing\nend\n"), ("b.qz", "class B\nend\n")]);
    let mut registry = TypeRegistry::new();
    let result = load_stdlib(&mut registry, &options(&dir, true), &mut DeclParser::new(), TypeCollector::new);
    assert!(matches!(result, Err(BootstrapError::Declaration { .. })));
    assert_eq!(registry.lookup("B"), None);
}

#[test]
fn test_later_files_see_earlier_declarations() {
    let dir = stdlib_dir(&[
        ("a.qz", "module Comparable\n  def <=>(other : Object) : Int\nend\n"),
        ("b.qz", "class Version < Value\n  include Comparable\nend\n"),
    ]);
    let registry = bootstrap(&options(&dir, true)).unwrap();
    let version = registry.lookup("Version").unwrap();
    let comparable = registry.lookup("Comparable").unwrap();
    assert_eq!(registry.lookup_method(version, "<=>").unwrap().owner, Owner::Type(comparable));
}

#[test]
fn test_target_flows_into_stdlib_primitives() {
    let dir = stdlib_dir(&[("word.qz", "primitive Word < Value : ptr 4\n")]);
    let options = options(&dir, "word").with_target(Target::HOST_32);
    let registry = bootstrap(&options).unwrap();
    let word = registry.lookup("Word").unwrap();
    assert_eq!(registry.get(word).as_primitive().unwrap().byte_size, 4);

    let err = bootstrap(&options.with_target(Target::HOST_64)).unwrap_err();
    assert!(matches!(err, BootstrapError::Declaration { .. }));
}

// =============================================================================
// Shipped standard library
// =============================================================================

#[test]
fn test_shipped_stdlib_loads_completely() {
    let options = CompilerOptions::new()
        .with_load_std(true)
        .with_stdlib_root(shipped_stdlib());
    let registry = bootstrap(&options).unwrap();

    // C, LibM, Math, Short, Double
    assert_eq!(registry.len(), 19);
    assert_eq!(registry.library_names(), vec!["c", "m"]);

    let argv = registry.argv();
    let found = registry.lookup_method(argv, "length").unwrap();
    assert_eq!(found.owner, Owner::Type(registry.array()));
    let found = registry.lookup_method(argv, "count").unwrap();
    assert_eq!(found.owner, Owner::Type(registry.enumerable()));
    let found = registry.lookup_method(registry.long(), "zero?").unwrap();
    assert_eq!(found.owner, Owner::Type(registry.numeric()));
    let found = registry.lookup_method(registry.int(), "to_s").unwrap();
    assert_eq!(found.owner, Owner::Type(registry.int()));
    let found = registry.lookup_method(registry.symbol(), "inspect").unwrap();
    assert_eq!(found.owner, Owner::Type(registry.object()));

    let argv_fn = registry.lookup_global("argv").unwrap();
    assert_eq!(argv_fn.sig.return_type, TypeRef::Type(argv));
    assert!(registry.lookup_global("exit").unwrap().sig.return_type.is_void());
}

#[test]
fn test_shipped_stdlib_loads_file_by_file() {
    let stdlib = shipped_stdlib();
    let names = ["numeric", "math", "io"].map(String::from).to_vec();
    let options = CompilerOptions::new().with_load_std(names).with_stdlib_root(&stdlib);
    let registry = bootstrap(&options).unwrap();
    assert_eq!(registry.library_names(), vec!["m", "c"]);
}
