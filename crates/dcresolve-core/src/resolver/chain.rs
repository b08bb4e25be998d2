//! The chain of wrapper executables seen in one logical command.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::fs::FsProvider;
use super::types::ResolveError;

/// Ordered absolute paths of every wrapper invocation so far, self included.
///
/// Serialized into `COMPOSE_RESOLVE` with the platform path-list separator
/// when passed to a child process. It only ever grows: each resolving
/// invocation appends exactly one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchChain {
    entries: Vec<PathBuf>,
}

impl SearchChain {
    /// Parse an inherited `COMPOSE_RESOLVE` value. Blank entries are dropped.
    pub fn parse(value: Option<&OsStr>) -> Self {
        let entries = value
            .map(|v| {
                std::env::split_paths(v)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.push(path.into());
        self
    }

    /// Whether `candidate` is one of the chain's executables.
    ///
    /// Both sides are compared after canonicalization so a symlinked
    /// install still matches the binary it points at.
    pub fn contains(&self, candidate: &Path, fs: &dyn FsProvider) -> bool {
        let candidate = fs.canonicalize(candidate);
        self.entries
            .iter()
            .any(|entry| entry == &candidate || fs.canonicalize(entry) == candidate)
    }

    /// The value to export as `COMPOSE_RESOLVE` to child processes.
    pub fn to_env_value(&self) -> Result<OsString, ResolveError> {
        std::env::join_paths(&self.entries).map_err(ResolveError::ChainEncoding)
    }
}
