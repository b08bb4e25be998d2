//! Errors raised while composing compose files.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while rendering compose files.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Could not determine the working directory for relative file paths.
    #[error("could not get working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The per-invocation temp directory could not be created.
    #[error("failed to create temp dir: {0}")]
    Workspace(#[source] std::io::Error),

    /// A rendered output file could not be created.
    #[error("failed to create temp output file {}: {source}", .path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A compose file path has no parent directory to render from.
    #[error("cannot determine the directory of {}", .0.display())]
    NoParent(PathBuf),

    /// The render subprocess could not be started.
    #[error("failed to run [{command}] in {}: {source}", .dir.display())]
    Spawn {
        command: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The render subprocess exited unsuccessfully.
    #[error("failed to run [{command}] in {}: {status}\n{stderr}", .dir.display())]
    RenderFailed {
        command: String,
        dir: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    /// A render task panicked or was aborted.
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
