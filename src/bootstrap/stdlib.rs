//! Standard-library discovery and file enumeration

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use quartz_core::lang::stdlib::{SOURCE_EXTENSION, STDLIB_DIR, STDLIB_ENV_VAR};

use crate::error::BootstrapError;

/// A standard-library root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stdlib {
    root: PathBuf,
}

impl Stdlib {
    /// Use `root` as-is, without checking it exists.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the standard library: `QUARTZ_STDLIB`, then `./std`, then next to the executable (and up to two
    /// parents, for `target/debug`), then the `std/` shipped with this crate.
    pub fn locate() -> Option<Self> {
        if let Ok(path) = env::var(STDLIB_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.is_dir() {
                return Some(Self::at(path));
            }
            tracing::warn!(path = %path.display(), "{STDLIB_ENV_VAR} is not a directory, ignoring");
        }

        // Development mode
        let dev = Path::new(STDLIB_DIR);
        if dev.is_dir() {
            return Some(Self::at(dev));
        }

        if let Ok(exe_path) = env::current_exe() {
            let mut dir = exe_path.parent();
            for _ in 0..3 {
                let Some(current) = dir else {
                    break;
                };
                let candidate = current.join(STDLIB_DIR);
                if candidate.is_dir() {
                    return Some(Self::at(candidate));
                }
                dir = current.parent();
            }
        }

        let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join(STDLIB_DIR);
        shipped.is_dir().then(|| Self::at(shipped))
    }

    /// Explicit root if given (must be a directory), otherwise [`Stdlib::locate`].
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, BootstrapError> {
        match explicit {
            Some(root) if root.is_dir() => Ok(Self::at(root)),
            Some(root) => Err(BootstrapError::StdlibRootMissing {
                path: root.to_path_buf(),
            }),
            None => Self::locate().ok_or(BootstrapError::StdlibNotFound),
        }
    }

    /// `root/<name>.qz`. A name that already carries the extension is used verbatim.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            path
        } else {
            self.root.join(format!("{name}.{SOURCE_EXTENSION}"))
        }
    }

    /// Every source file under the root, recursively, sorted by path.
    pub fn all_sources(&self) -> Result<Vec<PathBuf>, BootstrapError> {
        let mut files = Vec::new();
        collect_sources(&self.root, &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn collect_sources(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), BootstrapError> {
    let io_error = |source| BootstrapError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        // `file_type` does not follow symlinks: linked directories are skipped.
        let file_type = entry.file_type().map_err(io_error)?;
        let path = entry.path();
        if file_type.is_dir() {
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if !hidden {
                collect_sources(&path, files)?;
            }
        } else if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) && !path.is_dir() {
            files.push(path);
        }
    }
    Ok(())
}
