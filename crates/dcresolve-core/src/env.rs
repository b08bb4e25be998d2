//! Environment access and the configuration snapshot read at startup.
//!
//! The wrapper is configured entirely through environment variables. Every
//! read goes through [`EnvProvider`] so that resolution and composition can
//! be exercised against a fixed environment in tests.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::resolver::SearchChain;

/// Compose file list, joined with the platform path-list separator.
pub const COMPOSE_FILE_VAR: &str = "COMPOSE_FILE";

/// Chain of wrapper executables already tried in this resolution.
pub const CHAIN_VAR: &str = "COMPOSE_RESOLVE";

/// Any non-empty value enables debug tracing on stderr.
pub const DEBUG_VAR: &str = "COMPOSE_RESOLVE_DEBUG";

/// Executable search path.
pub const PATH_VAR: &str = "PATH";

/// Working directory as seen by shells and the target tool.
pub const PWD_VAR: &str = "PWD";

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider {
    /// Get an environment variable.
    fn get(&self, key: &str) -> Option<OsString>;
}

/// Production environment provider that reads from the actual process environment.
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Test/mock environment provider with predefined variables.
#[cfg(test)]
#[derive(Default)]
pub struct MockEnv {
    vars: std::collections::HashMap<String, OsString>,
}

#[cfg(test)]
impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvProvider for MockEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}

/// Platform path-list separator.
#[cfg(unix)]
pub const PATH_LIST_SEPARATOR: char = ':';
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';

/// Everything the wrapper reads from its environment, captured once.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Entries of `COMPOSE_FILE`, trimmed, blanks dropped, in order.
    pub compose_files: Vec<PathBuf>,
    /// Chain inherited from an outer wrapper invocation.
    pub chain: SearchChain,
    /// Whether `COMPOSE_RESOLVE_DEBUG` is set to a non-empty value.
    pub debug: bool,
    /// Raw `PATH`.
    pub search_path: Option<OsString>,
}

impl Settings {
    pub fn from_env(env: &dyn EnvProvider) -> Self {
        Self {
            compose_files: env
                .get(COMPOSE_FILE_VAR)
                .map(|value| split_file_list(&value.to_string_lossy()))
                .unwrap_or_default(),
            chain: SearchChain::parse(env.get(CHAIN_VAR).as_deref()),
            debug: env.get(DEBUG_VAR).is_some_and(|v| !v.is_empty()),
            search_path: env.get(PATH_VAR),
        }
    }

    /// An outer wrapper already rewrote the file flags for this invocation.
    pub fn is_nested(&self) -> bool {
        !self.chain.is_empty()
    }
}

/// Split a `COMPOSE_FILE` style list into trimmed, non-empty paths.
pub fn split_file_list(value: &str) -> Vec<PathBuf> {
    value
        .split(PATH_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}
