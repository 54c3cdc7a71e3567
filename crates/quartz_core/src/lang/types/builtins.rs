//! Builtin type vocabulary.
//!
//! This registry covers the closed set of types every compilation starts with, in the order the compiler
//! registers them.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; type names are capitalized.
//! - `ARGV` is not a class of its own: it is the `Array` specialization over `String`.
//!
//! ## Examples
//! ```rust
//! use quartz_core::lang::types::builtins::{self, BuiltinTypeId};
//!
//! assert_eq!(builtins::from_str("Int"), Some(BuiltinTypeId::Int));
//! assert_eq!(builtins::as_str(BuiltinTypeId::Argv), "ARGV");
//! assert_eq!(builtins::BUILTIN_TYPES.len(), 14);
//! ```

/// Stable identifier for builtin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Object,
    Value,
    Numeric,
    Enumerable,
    Array,
    Bool,
    Char,
    Int,
    Long,
    Float,
    String,
    Symbol,
    Pointer,
    Argv,
}

/// Which type variant a builtin is registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Object,
    Module,
    Primitive,
    Array,
}

/// Metadata for a builtin type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub id: BuiltinTypeId,
    pub canonical: &'static str,
    pub kind: BuiltinKind,
    pub description: &'static str,
}

/// Registry of builtin types, in registration order.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    info(BuiltinTypeId::Object, "Object", BuiltinKind::Object, "Root of the class hierarchy."),
    info(BuiltinTypeId::Value, "Value", BuiltinKind::Object, "Base of value-semantics types."),
    info(BuiltinTypeId::Numeric, "Numeric", BuiltinKind::Object, "Base of numeric primitives."),
    info(
        BuiltinTypeId::Enumerable,
        "Enumerable",
        BuiltinKind::Module,
        "Iteration capability mixed into containers.",
    ),
    info(BuiltinTypeId::Array, "Array", BuiltinKind::Array, "Generic array template."),
    info(BuiltinTypeId::Bool, "Bool", BuiltinKind::Primitive, "Boolean."),
    info(BuiltinTypeId::Char, "Char", BuiltinKind::Primitive, "Single byte character."),
    info(BuiltinTypeId::Int, "Int", BuiltinKind::Primitive, "32-bit signed integer."),
    info(BuiltinTypeId::Long, "Long", BuiltinKind::Primitive, "64-bit signed integer."),
    info(BuiltinTypeId::Float, "Float", BuiltinKind::Primitive, "32-bit float."),
    info(BuiltinTypeId::String, "String", BuiltinKind::Primitive, "Pointer to character data."),
    info(BuiltinTypeId::Symbol, "Symbol", BuiltinKind::Primitive, "Index into the symbol table."),
    info(BuiltinTypeId::Pointer, "Pointer", BuiltinKind::Primitive, "Untyped machine pointer."),
    info(
        BuiltinTypeId::Argv,
        "ARGV",
        BuiltinKind::Array,
        "Program arguments: `Array` specialized over `String`.",
    ),
];

/// Canonical spelling.
pub fn as_str(id: BuiltinTypeId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("builtin type info missing")
}

/// Resolve a builtin type name.
pub fn from_str(name: &str) -> Option<BuiltinTypeId> {
    BUILTIN_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

const fn info(
    id: BuiltinTypeId,
    canonical: &'static str,
    kind: BuiltinKind,
    description: &'static str,
) -> BuiltinTypeInfo {
    BuiltinTypeInfo {
        id,
        canonical,
        kind,
        description,
    }
}
