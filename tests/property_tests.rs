//! Property-based tests for the Quartz type registry
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use quartz::bootstrap::Stdlib;
use quartz::registry::TypeRegistry;
use quartz::types::TypeId;

/// Builtin element types by position in registration order.
fn builtin_ids(registry: &TypeRegistry) -> Vec<TypeId> {
    registry.iter().map(|(id, _)| id).collect()
}

// =============================================================================
// Specialization Properties
// =============================================================================

proptest! {
    /// Property: `array_of` returns the same entry for the same element, and each distinct element adds at most
    /// one entry.
    #[test]
    fn array_of_is_cached(picks in prop::collection::vec(0usize..14, 1..20)) {
        let mut registry = TypeRegistry::new();
        let ids = builtin_ids(&registry);
        let string = registry.string();

        let mut seen = BTreeSet::new();
        for &pick in &picks {
            let element = ids[pick];
            let first = registry.array_of(element).unwrap();
            let again = registry.array_of(element).unwrap();
            prop_assert_eq!(first, again);
            if element == string {
                prop_assert_eq!(first, registry.argv());
            }
            seen.insert(element);
        }

        let new_entries = seen.iter().filter(|&&e| e != string).count();
        prop_assert_eq!(registry.len(), 14 + new_entries);
        prop_assert!(registry.verify().is_ok());
    }

    /// Property: rebinding a specialization never touches its template.
    #[test]
    fn rebinding_is_isolated(first in 0usize..14, second in 0usize..14) {
        let mut registry = TypeRegistry::new();
        let ids = builtin_ids(&registry);
        let instance = registry.array_of(ids[first]).unwrap();
        registry.rebind_element(instance, ids[second]).unwrap();

        let template = registry.get(registry.array()).as_array().unwrap();
        prop_assert_eq!(template.element, registry.object());
        prop_assert_eq!(registry.get(instance).as_array().unwrap().element, ids[second]);
    }

    /// Property: the link manifest keeps exactly the non-empty library names, in declaration order.
    #[test]
    fn library_manifest_order(libnames in prop::collection::vec(prop::option::of("[a-z]{0,3}"), 0..12)) {
        let mut registry = TypeRegistry::new();
        for (i, libname) in libnames.iter().enumerate() {
            registry.declare_lib(&format!("Lib{i}"), libname.clone()).unwrap();
        }
        let expected: Vec<&str> = libnames
            .iter()
            .filter_map(|l| l.as_deref())
            .filter(|l| !l.is_empty())
            .collect();
        prop_assert_eq!(registry.library_names(), expected);
    }

    /// Property: symbol interning is a set; the table is sorted and deduplicated.
    #[test]
    fn symbol_table_is_sorted_set(symbols in prop::collection::vec("[a-z_]{1,6}", 0..30)) {
        let mut registry = TypeRegistry::new();
        for s in &symbols {
            registry.intern_symbol(s.as_str());
        }
        let expected: Vec<&str> = symbols.iter().map(String::as_str).collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(registry.symbol_table(), expected);
    }
}

// =============================================================================
// Bootstrap Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: "load everything" order depends only on the paths, never on creation order.
    #[test]
    fn all_sources_are_sorted(names in prop::collection::btree_set("[a-z]{1,8}", 1..10), reverse in any::<bool>()) {
        let dir = tempfile::tempdir().unwrap();
        let mut create: Vec<&String> = names.iter().collect();
        if reverse {
            create.reverse();
        }
        for name in create {
            fs::write(dir.path().join(format!("{name}.qz")), "").unwrap();
        }

        let files = Stdlib::at(dir.path()).all_sources().unwrap();
        let stems: Vec<String> = files
            .iter()
            .map(|f| f.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        let expected: Vec<String> = names.into_iter().collect();
        prop_assert_eq!(stems, expected);
    }

    /// Property: the declaration parser never panics, whatever the input.
    #[test]
    fn parser_never_panics(source in "\\PC{0,200}") {
        let _ = quartz_syntax::parse_source(&source);
    }
}
