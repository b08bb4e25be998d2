//! First-match executable lookup over a slice of search directories.

use super::fs::FsProvider;
use super::types::{Attempt, AttemptOutcome};
use crate::env::EnvProvider;
use std::path::{Path, PathBuf};

/// Result of searching one suffix of the search path.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Every candidate checked, in order.
    pub attempts: Vec<Attempt>,
    /// Index into the searched slice of the directory holding the match, and the match.
    pub hit: Option<(usize, PathBuf)>,
}

/// Search for an executable in a list of directories.
pub struct ExecutableSearcher<'a> {
    #[cfg_attr(not(windows), allow(dead_code))]
    env: &'a dyn EnvProvider,
    fs: &'a dyn FsProvider,
}

impl<'a> ExecutableSearcher<'a> {
    pub fn new(env: &'a dyn EnvProvider, fs: &'a dyn FsProvider) -> Self {
        Self { env, fs }
    }

    /// Find the first directory in `dirs` containing an executable `command`.
    pub fn search_dirs(&self, command: &str, dirs: &[PathBuf]) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();

        for (index, dir) in dirs.iter().enumerate() {
            for name in self.candidate_names(command) {
                let candidate = dir.join(&name);
                let result = self.fs.check_executable(&candidate);
                let found = result == AttemptOutcome::Ok;
                outcome.attempts.push(Attempt {
                    candidate: candidate.clone(),
                    outcome: result,
                });
                if found {
                    outcome.hit = Some((index, candidate));
                    return outcome;
                }
            }
        }

        outcome
    }

    #[cfg(not(windows))]
    fn candidate_names(&self, command: &str) -> Vec<String> {
        vec![command.to_string()]
    }

    /// Get PATHEXT variants (e.g., docker-compose -> [docker-compose, docker-compose.exe, ...]).
    #[cfg(windows)]
    fn candidate_names(&self, command: &str) -> Vec<String> {
        let mut variants = vec![command.to_string()];

        if let Some(pathext) = self.env.get("PATHEXT") {
            for ext in pathext.to_string_lossy().split(';') {
                if !ext.is_empty() {
                    variants.push(format!("{command}{}", ext.to_ascii_lowercase()));
                }
            }
        } else {
            for ext in [".exe", ".cmd", ".bat", ".com"] {
                variants.push(format!("{command}{ext}"));
            }
        }

        variants
    }
}

/// Split a raw search path, dropping empty entries.
pub fn split_search_path(path: Option<&std::ffi::OsStr>) -> Vec<PathBuf> {
    path.map(|p| {
        std::env::split_paths(p)
            .filter(|dir| dir != Path::new(""))
            .collect()
    })
    .unwrap_or_default()
}
