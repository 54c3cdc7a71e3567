//! Compiler configuration
//!
//! Options chosen once per compilation, before the type registry is built.

use std::path::PathBuf;

use quartz_core::Target;

use crate::bootstrap::LoadStd;

/// Options for building the type registry and loading the standard library
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Which standard-library files to ingest
    pub load_std: LoadStd,
    /// Machine parameters used for primitive layouts
    pub target: Target,
    /// Explicit standard-library root; discovered when `None`
    pub stdlib_root: Option<PathBuf>,
}

impl CompilerOptions {
    /// Create options with default settings (no standard library, 64-bit target)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set which standard-library files to load
    pub fn with_load_std(mut self, load_std: impl Into<LoadStd>) -> Self {
        self.load_std = load_std.into();
        self
    }

    /// Set the target machine
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Set the standard-library root directory
    pub fn with_stdlib_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.stdlib_root = Some(root.into());
        self
    }
}
