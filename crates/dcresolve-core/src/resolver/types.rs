//! Types for target tool resolution.

use std::path::PathBuf;

/// A single candidate checked during the search.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// The path that was checked.
    pub candidate: PathBuf,
    /// The outcome of checking this candidate.
    pub outcome: AttemptOutcome,
}

/// Possible outcomes when checking a candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// File was found and is executable.
    Ok,
    /// Executable, but it is a wrapper instance already in the chain.
    PreviousInstance,
    /// Path does not exist.
    NotFound,
    /// Path exists but is not a file (e.g., directory).
    NotAFile,
    /// File exists but is not marked executable.
    NotExecutable,
    /// Permission denied when checking the path.
    PermissionDenied,
    /// Other I/O error occurred.
    IoError(String),
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::PreviousInstance => write!(f, "previous wrapper instance"),
            Self::NotFound => write!(f, "not found"),
            Self::NotAFile => write!(f, "not a file"),
            Self::NotExecutable => write!(f, "not executable"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

/// Error returned when the genuine target tool cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to determine the path of the running executable: {0}")]
    SelfPath(#[source] std::io::Error),

    #[error("could not get working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to find {command} in PATH {search_path:?}. Tried:\n{attempts}")]
    NotFound {
        command: String,
        search_path: String,
        attempts: String,
    },

    #[error("failed to encode the resolution chain: {0}")]
    ChainEncoding(#[source] std::env::JoinPathsError),
}

impl ResolveError {
    /// Create a `NotFound` error listing every candidate that was rejected.
    pub fn not_found(command: impl Into<String>, search_path: impl Into<String>, attempts: &[Attempt]) -> Self {
        let attempts_str = attempts
            .iter()
            .filter(|a| a.outcome != AttemptOutcome::NotFound)
            .map(|a| format!("  ✗ {}: {}", a.candidate.display(), a.outcome))
            .collect::<Vec<_>>()
            .join("\n");

        Self::NotFound {
            command: command.into(),
            search_path: search_path.into(),
            attempts: if attempts_str.is_empty() {
                "  (no candidates found)".to_string()
            } else {
                attempts_str
            },
        }
    }
}
