//! CLI module for the Quartz front end
//!
//! ## Commands
//!
//! - `types [--json]` - Dump the type registry in registration order
//! - `libs` - Print the native libraries to link, one per line
//! - `check` - Bootstrap the standard library and verify the type lattice
//! - `method <TYPE> <NAME>` - Resolve a method through members, includes and superclasses
//!
//! Every command first builds a registry from the global options (`--std`, `--stdlib-root`,
//! `--pointer-size`).
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quartz_core::{POINTER_SIZE, Target};

use crate::bootstrap::LoadStd;
use crate::config::CompilerOptions;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic with miette's graphical reporter.
    pub fn diagnostic(error: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(error)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Type registry and standard-library bootstrap for the Quartz compiler front end
#[derive(Parser, Debug)]
#[command(name = "quartz")]
#[command(version = VERSION)]
#[command(about = "Inspect the Quartz type registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Standard-library files to load: `all`, `none`, or file names (repeatable)
    #[arg(long = "std", value_name = "NAME", global = true, default_value = "all")]
    pub std: Vec<String>,

    /// Standard-library root directory (default: discovered)
    #[arg(long = "stdlib-root", value_name = "DIR", global = true)]
    pub stdlib_root: Option<PathBuf>,

    /// Target pointer size in bytes
    #[arg(long = "pointer-size", value_name = "BYTES", global = true, default_value_t = POINTER_SIZE)]
    pub pointer_size: u32,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dump the type registry
    Types {
        /// Emit JSON instead of the declaration-style dump
        #[arg(long)]
        json: bool,
    },

    /// Print the native libraries to link
    Libs,

    /// Bootstrap and verify the type lattice
    Check,

    /// Resolve a method (`main` for top-level methods)
    Method {
        /// Receiver type
        #[arg(value_name = "TYPE")]
        ty: String,
        /// Method name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

impl Cli {
    /// Compiler options selected by the global flags.
    pub fn options(&self) -> CompilerOptions {
        let mut options = CompilerOptions::new()
            .with_load_std(LoadStd::from_args(&self.std))
            .with_target(Target::new(self.pointer_size));
        if let Some(root) = &self.stdlib_root {
            options = options.with_stdlib_root(root);
        }
        options
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = cli.options();
    tracing::debug!(?options, "resolved compiler options");

    match cli.command {
        Command::Types { json } => commands::types(&options, json),
        Command::Libs => commands::libs(&options),
        Command::Check => commands::check(&options),
        Command::Method { ty, name } => commands::method(&options, &ty, &name),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_types() {
        let cli = Cli::try_parse_from(["quartz", "types", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Types { json: true }));
        assert_eq!(cli.std, vec!["all"]);
        assert_eq!(cli.options().load_std, LoadStd::All);
    }

    #[test]
    fn test_cli_parse_method() {
        let cli = Cli::try_parse_from(["quartz", "method", "Int", "+"]).unwrap();
        if let Command::Method { ty, name } = cli.command {
            assert_eq!(ty, "Int");
            assert_eq!(name, "+");
        } else {
            panic!("Expected Method command");
        }
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quartz",
            "libs",
            "--std",
            "io",
            "--std",
            "math",
            "--stdlib-root",
            "/tmp/std",
            "--pointer-size",
            "4",
        ])
        .unwrap();
        let options = cli.options();
        assert_eq!(options.load_std, LoadStd::Names(vec!["io".into(), "math".into()]));
        assert_eq!(options.stdlib_root, Some(PathBuf::from("/tmp/std")));
        assert_eq!(options.target, Target::HOST_32);
    }

    #[test]
    fn test_cli_std_none() {
        let cli = Cli::try_parse_from(["quartz", "--std", "none", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check));
        assert_eq!(cli.options().load_std, LoadStd::None);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["quartz"]).is_err());
    }
}
