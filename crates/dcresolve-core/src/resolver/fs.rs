//! Filesystem provider trait for testable resolution.

use super::types::AttemptOutcome;
use std::path::{Path, PathBuf};

/// Trait for filesystem operations (injectable for testing).
pub trait FsProvider {
    /// Check if a path exists and is a valid executable.
    fn check_executable(&self, path: &Path) -> AttemptOutcome;

    /// Resolve symlinks, returning the path unchanged if that fails.
    fn canonicalize(&self, path: &Path) -> PathBuf;
}

/// Production filesystem provider that uses real filesystem operations.
pub struct SystemFs;

impl FsProvider for SystemFs {
    fn check_executable(&self, path: &Path) -> AttemptOutcome {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AttemptOutcome::NotFound,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return AttemptOutcome::PermissionDenied;
            }
            Err(e) => return AttemptOutcome::IoError(e.to_string()),
        };

        if !metadata.is_file() {
            return AttemptOutcome::NotAFile;
        }

        // Windows relies on PATHEXT instead of permission bits
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return AttemptOutcome::NotExecutable;
            }
        }

        AttemptOutcome::Ok
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Test/mock filesystem provider with predefined responses.
#[cfg(test)]
#[derive(Default)]
pub struct MockFs {
    executables: std::collections::HashSet<PathBuf>,
    non_executables: std::collections::HashSet<PathBuf>,
    links: std::collections::HashMap<PathBuf, PathBuf>,
}

#[cfg(test)]
impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executables.insert(path.into());
        self
    }

    #[must_use]
    pub fn with_non_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.non_executables.insert(path.into());
        self
    }

    /// Make `from` an executable symlink to `to`.
    #[must_use]
    pub fn with_link(mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        let from = from.into();
        self.executables.insert(from.clone());
        self.links.insert(from, to.into());
        self
    }
}

#[cfg(test)]
impl FsProvider for MockFs {
    fn check_executable(&self, path: &Path) -> AttemptOutcome {
        if self.executables.contains(path) {
            AttemptOutcome::Ok
        } else if self.non_executables.contains(path) {
            AttemptOutcome::NotExecutable
        } else {
            AttemptOutcome::NotFound
        }
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        self.links.get(path).cloned().unwrap_or_else(|| path.to_path_buf())
    }
}
