//! Builtin type vocabularies.
//!
//! ## Notes
//! - These registries are vocabulary only: they define spellings + metadata, not type system semantics.
//!   Hierarchy, layout, and specialization live in the compiler's type registry.

pub mod builtins;

pub use builtins::{BUILTIN_TYPES, BuiltinKind, BuiltinTypeId, BuiltinTypeInfo};
