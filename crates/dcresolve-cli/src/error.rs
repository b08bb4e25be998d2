//! CLI error type and exit code mapping.

use dcresolve_core::{ComposeError, ResolveError};
use thiserror::Error;

/// Everything that stops the wrapper before or while delegating.
///
/// A delegated tool that runs and exits non-zero is not an error; its exit
/// code is returned as is.
#[derive(Debug, Error)]
pub enum CliError {
    /// The wrapper's own flag parsing failed.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// The genuine target tool could not be located.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Rendering a compose file failed.
    #[error("failed to resolve docker-compose file args: {0}")]
    Compose(#[from] ComposeError),

    /// The delegated tool could not be started.
    #[error("{0:#}")]
    Delegate(#[from] anyhow::Error),
}

impl CliError {
    /// Map error to exit code: 2 for usage errors, 1 for everything else.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Resolve(_) | Self::Compose(_) | Self::Delegate(_) => 1,
        }
    }

    /// Write the error to stderr the way the user should see it.
    pub fn report(&self) {
        match self {
            // clap renders its own usage block
            Self::Usage(err) => {
                let _ = err.print();
            }
            other => eprintln!("{other}"),
        }
    }
}
