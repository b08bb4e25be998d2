//! Chain-aware resolution of the target tool.

use super::chain::SearchChain;
use super::fs::{FsProvider, SystemFs};
use super::search::{ExecutableSearcher, split_search_path};
use super::types::{AttemptOutcome, ResolveError};
use crate::env::{EnvProvider, Settings, SystemEnv};
use crate::paths::absolutize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the wrapped executable; the wrapper is installed under it too.
pub const TARGET_TOOL: &str = "docker-compose";

/// The genuine target tool and the chain to hand to every child process.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Absolute path of the genuine target tool.
    pub executable: PathBuf,
    /// Inherited chain extended with this invocation.
    pub chain: SearchChain,
}

/// Resolve [`TARGET_TOOL`] for the running process.
///
/// The running executable (canonicalized) is appended to the inherited
/// chain before searching `PATH`.
pub fn resolve_target(settings: &Settings) -> Result<Resolution, ResolveError> {
    let fs = SystemFs;
    let self_path = std::env::current_exe().map_err(ResolveError::SelfPath)?;
    let self_path = fs.canonicalize(&self_path);
    let cwd = std::env::current_dir().map_err(ResolveError::CurrentDir)?;

    resolve_with_deps(
        TARGET_TOOL,
        &self_path,
        settings.chain.clone(),
        settings.search_path.as_deref(),
        &cwd,
        &SystemEnv,
        &fs,
    )
}

/// Resolve with injected dependencies (for testing).
///
/// Walks the search path with an explicit cursor. Whenever the first match
/// in the remaining directories is a member of the chain, the cursor moves
/// past the directory containing it and the search repeats on what is
/// left. The walk ends after at most one pass over the directories.
pub fn resolve_with_deps(
    command: &str,
    self_path: &Path,
    inherited: SearchChain,
    search_path: Option<&OsStr>,
    cwd: &Path,
    env: &dyn EnvProvider,
    fs: &dyn FsProvider,
) -> Result<Resolution, ResolveError> {
    let chain = inherited.with(self_path);
    let dirs = split_search_path(search_path);
    let searcher = ExecutableSearcher::new(env, fs);

    let mut attempts = Vec::new();
    let mut cursor = 0;

    while cursor < dirs.len() {
        let mut outcome = searcher.search_dirs(command, &dirs[cursor..]);
        let Some((offset, candidate)) = outcome.hit.take() else {
            attempts.append(&mut outcome.attempts);
            break;
        };

        let candidate = absolutize(cwd, &candidate);
        if chain.contains(&candidate, fs) {
            debug!(
                candidate = %candidate.display(),
                "skipping previous wrapper instance"
            );
            if let Some(last) = outcome.attempts.last_mut() {
                last.outcome = AttemptOutcome::PreviousInstance;
            }
            attempts.append(&mut outcome.attempts);
            cursor += offset + 1;
            continue;
        }

        debug!(
            executable = %candidate.display(),
            chain_len = chain.len(),
            "resolved {command}"
        );
        return Ok(Resolution {
            executable: candidate,
            chain,
        });
    }

    let searched = search_path
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    Err(ResolveError::not_found(command, searched, &attempts))
}
