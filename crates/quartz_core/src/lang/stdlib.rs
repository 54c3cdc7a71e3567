//! Canonical standard-library layout.

/// Directory name of the standard-library root (e.g. `<workspace>/std`).
pub const STDLIB_DIR: &str = "std";

/// Extension of standard-library source files (without the dot).
pub const SOURCE_EXTENSION: &str = "qz";

/// Environment variable that overrides the standard-library root.
pub const STDLIB_ENV_VAR: &str = "QUARTZ_STDLIB";

/// Name of the module that owns every top-level declaration.
pub const MAIN_MODULE: &str = "main";
