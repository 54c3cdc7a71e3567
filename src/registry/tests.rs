use super::*;
use quartz_core::lang::types::BUILTIN_TYPES;

fn sig(name: &str, params: Vec<Param>, ret: TypeRef) -> MethodSig {
    MethodSig::new(name, params, ret)
}

// ========================================
// Construction
// ========================================

#[test]
fn test_fresh_registry_has_fourteen_builtins_in_order() {
    let registry = TypeRegistry::new();
    let names: Vec<&str> = registry.iter().map(|(_, ty)| ty.name.as_str()).collect();
    let expected: Vec<&str> = BUILTIN_TYPES.iter().map(|t| t.canonical).collect();
    assert_eq!(names, expected);
    assert_eq!(registry.len(), 14);
}

#[test]
fn test_named_accessors_resolve_to_their_names() {
    let registry = TypeRegistry::new();
    let cases = [
        (registry.object(), "Object"),
        (registry.value(), "Value"),
        (registry.numeric(), "Numeric"),
        (registry.enumerable(), "Enumerable"),
        (registry.array(), "Array"),
        (registry.bool(), "Bool"),
        (registry.char(), "Char"),
        (registry.int(), "Int"),
        (registry.long(), "Long"),
        (registry.float(), "Float"),
        (registry.string(), "String"),
        (registry.symbol(), "Symbol"),
        (registry.pointer(), "Pointer"),
        (registry.argv(), "ARGV"),
    ];
    for (id, name) in cases {
        assert_eq!(registry.get(id).name, name);
        assert_eq!(registry.lookup(name), Some(id));
    }
}

#[test]
fn test_void_is_not_an_entry() {
    let registry = TypeRegistry::new();
    assert!(registry.void().is_void());
    assert_eq!(registry.void().id(), None);
    assert_eq!(registry.lookup("void"), None);
    assert_eq!(registry.lookup("Void"), None);
    assert!(registry.iter().all(|(id, _)| TypeRef::Type(id) != registry.void()));
}

#[test]
fn test_primitive_leaves_carry_intrinsic_operations() {
    let registry = TypeRegistry::new();
    let (int, long, float) = (registry.int(), registry.long(), registry.float());

    let plus = registry.lookup_method(long, "+").unwrap();
    assert_eq!(plus.owner, Owner::Type(long));
    assert_eq!(plus.sig.params, vec![Param::new("other", long)]);
    assert_eq!(plus.sig.return_type, TypeRef::Type(long));

    let cmp = registry.lookup_method(float, "<=>").unwrap();
    assert_eq!(cmp.owner, Owner::Type(float));
    assert_eq!(cmp.sig.return_type, TypeRef::Type(int));

    let eq = registry.lookup_method(registry.bool(), "==").unwrap();
    assert_eq!(eq.sig.return_type, TypeRef::Type(registry.bool()));
    assert!(registry.lookup_method(registry.char(), "<").is_some());

    assert!(registry.lookup_method(int, "%").is_some());
    assert!(registry.lookup_method(float, "%").is_none());
    assert!(registry.lookup_method(registry.string(), "+").is_none());
    assert_eq!(registry.len(), 14);
}

#[test]
fn test_intrinsic_operations_cannot_be_redeclared() {
    let mut registry = TypeRegistry::new();
    let int = registry.int();
    let err = registry
        .define_method(int, sig("+", vec![Param::new("other", int)], int.into()))
        .unwrap_err();
    assert_eq!(
        err,
        DeclarationError::DuplicateMethod {
            owner: "Int".into(),
            method: "+".into()
        }
    );
}

#[test]
fn test_primitive_sizes_on_64_bit_target() {
    let registry = TypeRegistry::new();
    let size = |id: TypeId| registry.get(id).as_primitive().map(|p| p.byte_size);
    assert_eq!(size(registry.bool()), Some(1));
    assert_eq!(size(registry.char()), Some(1));
    assert_eq!(size(registry.int()), Some(4));
    assert_eq!(size(registry.long()), Some(8));
    assert_eq!(size(registry.float()), Some(4));
    assert_eq!(size(registry.string()), Some(8));
    assert_eq!(size(registry.symbol()), Some(4));
    assert_eq!(size(registry.pointer()), Some(8));
}

#[test]
fn test_pointer_sized_primitives_follow_target() {
    let registry = TypeRegistry::with_target(Target::HOST_32).unwrap();
    let string = registry.get(registry.string()).as_primitive().unwrap();
    assert_eq!(string.byte_size, 4);
    assert_eq!(string.repr, ReprId::Ptr);
    assert_eq!(registry.get(registry.long()).as_primitive().unwrap().byte_size, 8);
}

#[test]
fn test_unsupported_pointer_size_is_rejected() {
    let err = TypeRegistry::with_target(Target::new(3)).unwrap_err();
    assert_eq!(err, InvariantError::UnsupportedPointerSize { size: 3 });
}

#[test]
fn test_hierarchy_shape() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.superclass(registry.object()), None);
    assert_eq!(registry.superclass(registry.value()), Some(registry.object()));
    assert_eq!(registry.superclass(registry.numeric()), Some(registry.value()));
    assert_eq!(registry.superclass(registry.int()), Some(registry.numeric()));
    assert_eq!(registry.superclass(registry.string()), Some(registry.value()));
    assert_eq!(registry.superclass(registry.array()), Some(registry.object()));
    assert_eq!(registry.superclass(registry.enumerable()), None);
    assert_eq!(
        registry.ancestors(registry.float()),
        vec![registry.numeric(), registry.value(), registry.object()]
    );
    assert!(registry.is_subtype(registry.int(), registry.value()));
    assert!(!registry.is_subtype(registry.string(), registry.numeric()));
    assert!(registry.verify().is_ok());
}

#[test]
fn test_array_includes_enumerable_without_subtyping() {
    let registry = TypeRegistry::new();
    assert!(registry.includes_module(registry.array(), registry.enumerable()));
    assert!(registry.includes_module(registry.argv(), registry.enumerable()));
    assert!(!registry.is_subtype(registry.array(), registry.enumerable()));
    assert!(!registry.includes_module(registry.int(), registry.enumerable()));
}

#[test]
fn test_every_class_like_entry_reaches_object() {
    let registry = TypeRegistry::new();
    for (id, ty) in registry.iter() {
        if ty.is_class_like() && id != registry.object() {
            assert_eq!(registry.ancestors(id).last(), Some(&registry.object()), "{}", ty.name);
        }
    }
}

// ========================================
// Specialization
// ========================================

#[test]
fn test_argv_is_a_distinct_clone_of_array() {
    let registry = TypeRegistry::new();
    assert_ne!(registry.argv(), registry.array());
    let argv = registry.get(registry.argv()).as_array().unwrap();
    assert_eq!(argv.element, registry.string());
    assert_eq!(argv.template, Some(registry.array()));
    let array = registry.get(registry.array()).as_array().unwrap();
    assert_eq!(array.element, registry.object());
    assert_eq!(array.template, None);
}

#[test]
fn test_rebinding_argv_element_leaves_template_alone() {
    let mut registry = TypeRegistry::new();
    let argv = registry.argv();
    let int = registry.int();
    registry.rebind_element(argv, int).unwrap();
    assert_eq!(registry.get(argv).as_array().unwrap().element, int);
    assert_eq!(registry.get(registry.array()).as_array().unwrap().element, registry.object());
    // The cache follows the rebind.
    assert_eq!(registry.cached_instance(registry.array(), registry.string()), None);
    assert_eq!(registry.cached_instance(registry.array(), int), Some(argv));
}

#[test]
fn test_array_of_string_is_argv() {
    let mut registry = TypeRegistry::new();
    let string = registry.string();
    assert_eq!(registry.array_of(string).unwrap(), registry.argv());
    assert_eq!(registry.len(), 14);
}

#[test]
fn test_array_of_caches_new_instances() {
    let mut registry = TypeRegistry::new();
    let int = registry.int();
    let first = registry.array_of(int).unwrap();
    let second = registry.array_of(int).unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.get(first).name, "Array[Int]");
    assert_eq!(registry.len(), 15);
    assert!(registry.is_subtype(first, registry.object()));
}

#[test]
fn test_specializing_an_instance_uses_its_template() {
    let mut registry = TypeRegistry::new();
    let (argv, float) = (registry.argv(), registry.float());
    let id = registry.instantiate(argv, float).unwrap();
    assert_eq!(registry.get(id).as_array().unwrap().template, Some(registry.array()));
    assert_eq!(registry.get(id).name, "Array[Float]");
}

#[test]
fn test_specializing_non_array_fails() {
    let mut registry = TypeRegistry::new();
    let (int, string) = (registry.int(), registry.string());
    let err = registry.specialize_array(int, string, None).unwrap_err();
    assert_eq!(err, DeclarationError::NotGeneric { name: "Int".into() });
    assert!(registry.rebind_element(int, string).is_err());
}

// ========================================
// Declarations
// ========================================

#[test]
fn test_declare_object_and_conflict() {
    let mut registry = TypeRegistry::new();
    let object = registry.object();
    let bar = registry.declare_object("Bar", object).unwrap();
    assert_eq!(registry.superclass(bar), Some(object));
    assert_eq!(registry.len(), 15);

    let err = registry.declare_module("Bar").unwrap_err();
    assert_eq!(
        err,
        DeclarationError::AlreadyDefined {
            name: "Bar".into(),
            existing: "class"
        }
    );
}

#[test]
fn test_redeclaration_message_names_the_existing_kind() {
    let mut registry = TypeRegistry::new();
    let err = registry.declare_module("Array").unwrap_err();
    assert_eq!(err.to_string(), "`Array` is already defined (array)");
    let err = registry.declare_lib("Int", None).unwrap_err();
    assert_eq!(err.to_string(), "`Int` is already defined (primitive)");
}

#[test]
fn test_cannot_inherit_from_module() {
    let mut registry = TypeRegistry::new();
    let enumerable = registry.enumerable();
    let err = registry.declare_object("Bad", enumerable).unwrap_err();
    assert_eq!(err, DeclarationError::NotAClass { name: "Enumerable".into() });
}

#[test]
fn test_declare_primitive_checks_layout() {
    let mut registry = TypeRegistry::new();
    let numeric = registry.numeric();
    registry.declare_primitive("Short", numeric, ReprId::I16, 2).unwrap();

    let err = registry.declare_primitive("Word", numeric, ReprId::Ptr, 4).unwrap_err();
    assert_eq!(
        err,
        DeclarationError::Layout(InvariantError::LayoutMismatch {
            name: "Word".into(),
            repr: ReprId::Ptr,
            declared: 4,
            expected: 8,
        })
    );
    assert_eq!(registry.lookup("Word"), None);
}

#[test]
fn test_include_rules() {
    let mut registry = TypeRegistry::new();
    let comparable = registry.declare_module("Comparable").unwrap();
    let int = registry.int();
    let string = registry.string();

    registry.include(int, comparable).unwrap();
    assert!(registry.includes_module(int, comparable));
    assert_eq!(
        registry.include(int, comparable).unwrap_err(),
        DeclarationError::DuplicateInclude {
            owner: "Int".into(),
            module: "Comparable".into()
        }
    );
    assert_eq!(
        registry.include(comparable, comparable).unwrap_err(),
        DeclarationError::SelfInclude {
            name: "Comparable".into()
        }
    );
    assert_eq!(
        registry.include(int, string).unwrap_err(),
        DeclarationError::NotAModule { name: "String".into() }
    );

    registry.include(Owner::Main, comparable).unwrap();
    assert_eq!(registry.main().includes, vec![comparable]);
}

#[test]
fn test_define_method_rejects_duplicates() {
    let mut registry = TypeRegistry::new();
    let int = registry.int();
    registry.define_method(int, sig("to_s", vec![], registry.string().into())).unwrap();
    let err = registry.define_method(int, sig("to_s", vec![], TypeRef::Void)).unwrap_err();
    assert_eq!(
        err,
        DeclarationError::DuplicateMethod {
            owner: "Int".into(),
            method: "to_s".into()
        }
    );
}

// ========================================
// Lookup
// ========================================

#[test]
fn test_lookup_tiers() {
    let mut registry = TypeRegistry::new();
    let (object, value, int, enumerable) = (registry.object(), registry.value(), registry.int(), registry.enumerable());
    let string = registry.string();

    registry.define_method(object, sig("to_s", vec![], string.into())).unwrap();
    registry.define_method(value, sig("to_s", vec![], string.into())).unwrap();
    registry.define_method(enumerable, sig("each", vec![], TypeRef::Void)).unwrap();
    let printable = registry.declare_module("Printable").unwrap();
    registry.define_method(printable, sig("to_s", vec![], TypeRef::Void)).unwrap();
    registry.include(int, printable).unwrap();

    // Included module beats the superclass chain.
    assert_eq!(registry.lookup_method(int, "to_s").unwrap().owner, Owner::Type(printable));
    // Own member beats included module.
    registry.define_method(int, sig("to_s", vec![], string.into())).unwrap();
    assert_eq!(registry.lookup_method(int, "to_s").unwrap().owner, Owner::Type(int));
    // Superclass chain.
    assert_eq!(
        registry.lookup_method(registry.long(), "to_s").unwrap().owner,
        Owner::Type(value)
    );
    assert!(registry.lookup_method(int, "each").is_none());
}

#[test]
fn test_array_instances_see_template_members_and_includes() {
    let mut registry = TypeRegistry::new();
    let (array, int, enumerable) = (registry.array(), registry.int(), registry.enumerable());
    registry.define_method(array, sig("length", vec![], int.into())).unwrap();
    registry.define_method(enumerable, sig("each", vec![], TypeRef::Void)).unwrap();

    let argv = registry.argv();
    assert_eq!(registry.lookup_method(argv, "length").unwrap().owner, Owner::Type(array));
    assert_eq!(registry.lookup_method(argv, "each").unwrap().owner, Owner::Type(enumerable));

    let ints = registry.array_of(int).unwrap();
    assert!(registry.lookup_method(ints, "length").is_some());
}

#[test]
fn test_lookup_terminates_on_mutual_includes() {
    let mut registry = TypeRegistry::new();
    let a = registry.declare_module("A").unwrap();
    let b = registry.declare_module("B").unwrap();
    registry.include(a, b).unwrap();
    registry.include(b, a).unwrap();
    let int = registry.int();
    registry.include(int, a).unwrap();
    assert!(registry.lookup_method(int, "missing").is_none());
    assert!(registry.includes_module(int, b));
}

#[test]
fn test_lookup_global() {
    let mut registry = TypeRegistry::new();
    let string = registry.string();
    registry
        .define_method(Owner::Main, sig("puts", vec![Param::new("value", string)], TypeRef::Void))
        .unwrap();
    let found = registry.lookup_global("puts").unwrap();
    assert_eq!(found.owner, Owner::Main);
    assert_eq!(found.sig.params[0].ty, string);
    assert!(registry.lookup_global("gets").is_none());
}

// ========================================
// Libraries, symbols, poisoning
// ========================================

#[test]
fn test_library_names_skip_empty_and_keep_order() {
    let mut registry = TypeRegistry::new();
    registry.declare_lib("M", Some("m".into())).unwrap();
    registry.declare_lib("N", Some(String::new())).unwrap();
    registry.declare_lib("O", None).unwrap();
    registry.declare_lib("C", Some("c".into())).unwrap();
    registry.declare_lib("M2", Some("m".into())).unwrap();
    assert_eq!(registry.library_names(), vec!["m", "c", "m"]);
}

#[test]
fn test_fresh_registry_links_nothing() {
    assert!(TypeRegistry::new().library_names().is_empty());
}

#[test]
fn test_symbols_are_deduplicated_and_sorted() {
    let mut registry = TypeRegistry::new();
    assert!(registry.symbol_table().is_empty());
    assert!(registry.intern_symbol("foo"));
    assert!(registry.intern_symbol("bar"));
    assert!(!registry.intern_symbol("foo"));
    assert_eq!(registry.symbol_table(), vec!["bar", "foo"]);
}

#[test]
fn test_poisoned_registry_is_unusable() {
    let mut registry = TypeRegistry::new();
    assert!(registry.ensure_usable().is_ok());
    registry.poison();
    assert!(registry.is_poisoned());
    assert!(matches!(registry.ensure_usable(), Err(BootstrapError::InvalidRegistry)));
}

// ========================================
// Dump
// ========================================

#[test]
fn test_describe_method() {
    let registry = TypeRegistry::new();
    let index = sig("[]", vec![Param::new("index", registry.int())], registry.object().into());
    assert_eq!(registry.describe_method("def", &index), "def [](index : Int) : Object");
    let exit = sig("exit", vec![Param::new("status", registry.int())], TypeRef::Void);
    assert_eq!(registry.describe_method("def", &exit), "def exit(status : Int)");
}

#[test]
fn test_dump_includes_main_only_when_used() {
    let mut registry = TypeRegistry::new();
    assert!(!registry.dump().contains("module main"));
    registry
        .define_method(Owner::Main, sig("exit", vec![Param::new("status", registry.int())], TypeRef::Void))
        .unwrap();
    assert!(registry.dump().ends_with("module main\n  def exit(status : Int)\n"));
}
