//! Target machine description.
//!
//! The type registry never hard-codes the machine word size. Every size that depends on it (pointer-backed
//! primitives such as `String` and `Pointer`) is computed from a [`Target`] that is chosen once per compilation.
//!
//! ## Examples
//! ```rust
//! use quartz_core::target::{POINTER_SIZE, Target};
//!
//! assert_eq!(Target::default().pointer_size, POINTER_SIZE);
//! assert_eq!(Target::new(4).pointer_size, 4);
//! ```

/// Pointer size in bytes of the default (64-bit) target.
pub const POINTER_SIZE: u32 = 8;

/// Machine parameters that affect type layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    /// Size of a machine pointer in bytes.
    pub pointer_size: u32,
}

impl Target {
    /// 64-bit target (8-byte pointers).
    pub const HOST_64: Target = Target {
        pointer_size: POINTER_SIZE,
    };

    /// 32-bit target (4-byte pointers).
    pub const HOST_32: Target = Target { pointer_size: 4 };

    pub const fn new(pointer_size: u32) -> Self {
        Self { pointer_size }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::HOST_64
    }
}
