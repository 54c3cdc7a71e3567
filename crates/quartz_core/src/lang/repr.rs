//! Backend representation tags.
//!
//! A representation tag is the machine-level encoding a code generator emits for a primitive type
//! (e.g. "32-bit integer" or "pointer to bytes"). Each tag knows how much storage it occupies for a given
//! [`Target`]; the type registry checks every primitive's declared byte size against this.
//!
//! ## Notes
//! - `i1` is a single bit in registers but is stored as one byte.
//! - `ptr` is a pointer to `i8` (the `Char` representation); it is the encoding of `String` and `Pointer`.
//!
//! ## Examples
//! ```rust
//! use quartz_core::lang::repr::{self, ReprId};
//! use quartz_core::Target;
//!
//! assert_eq!(repr::from_str("i32"), Some(ReprId::I32));
//! assert_eq!(ReprId::I1.storage_size(Target::default()), 1);
//! assert_eq!(ReprId::Ptr.storage_size(Target::HOST_32), 4);
//! ```

use crate::target::Target;

/// Stable identifier for a backend representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReprId {
    I1,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Ptr,
}

/// How much storage a representation occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Fixed number of bytes on every target.
    Fixed(u32),
    /// One machine pointer.
    PointerWidth,
}

/// Metadata for a representation tag.
#[derive(Debug, Clone, Copy)]
pub struct ReprInfo {
    pub id: ReprId,
    pub canonical: &'static str,
    pub storage: Storage,
    pub description: &'static str,
}

/// Registry of all representation tags.
pub const REPRS: &[ReprInfo] = &[
    info(ReprId::I1, "i1", Storage::Fixed(1), "1-bit integer, stored as one byte."),
    info(ReprId::I8, "i8", Storage::Fixed(1), "8-bit integer."),
    info(ReprId::I16, "i16", Storage::Fixed(2), "16-bit integer."),
    info(ReprId::I32, "i32", Storage::Fixed(4), "32-bit integer."),
    info(ReprId::I64, "i64", Storage::Fixed(8), "64-bit integer."),
    info(ReprId::F32, "f32", Storage::Fixed(4), "32-bit IEEE float."),
    info(ReprId::F64, "f64", Storage::Fixed(8), "64-bit IEEE float."),
    info(ReprId::Ptr, "ptr", Storage::PointerWidth, "Pointer to i8 (machine pointer size)."),
];

impl ReprId {
    /// Bytes this representation occupies on `target`.
    pub fn storage_size(self, target: Target) -> u32 {
        match info_for(self).storage {
            Storage::Fixed(bytes) => bytes,
            Storage::PointerWidth => target.pointer_size,
        }
    }

    pub fn as_str(self) -> &'static str {
        as_str(self)
    }
}

impl std::fmt::Display for ReprId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

/// Canonical spelling.
pub fn as_str(id: ReprId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ReprId) -> &'static ReprInfo {
    REPRS.iter().find(|r| r.id == id).expect("repr info missing")
}

/// Resolve a representation spelling (as written in `primitive` declarations).
pub fn from_str(s: &str) -> Option<ReprId> {
    REPRS.iter().find(|r| r.canonical == s).map(|r| r.id)
}

const fn info(id: ReprId, canonical: &'static str, storage: Storage, description: &'static str) -> ReprInfo {
    ReprInfo {
        id,
        canonical,
        storage,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_storage_follows_target() {
        assert_eq!(ReprId::Ptr.storage_size(Target::HOST_64), 8);
        assert_eq!(ReprId::Ptr.storage_size(Target::new(2)), 2);
    }

    #[test]
    fn fixed_storage_ignores_target() {
        for target in [Target::HOST_32, Target::HOST_64] {
            assert_eq!(ReprId::I16.storage_size(target), 2);
            assert_eq!(ReprId::F64.storage_size(target), 8);
        }
    }
}
