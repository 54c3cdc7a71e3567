//! Provide shared, pure vocabulary and target constants for the Quartz compiler front end.
//!
//! This crate is intentionally small and dependency-free. It contains the tables that both the syntax
//! crate and the compiler consult so that spellings, builtin type names, and machine representations
//! never drift between them.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no compiler-specific types.
//! - Current scope: reserved words and punctuation of the declaration syntax, backend representation tags,
//!   builtin type names, standard-library layout constants, and the target word size.

pub mod lang;
pub mod target;

pub use target::{POINTER_SIZE, Target};
