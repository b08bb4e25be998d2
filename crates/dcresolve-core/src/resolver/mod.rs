//! Self-aware resolution of the genuine `docker-compose` executable.
//!
//! The wrapper is installed under the same name as the tool it wraps and
//! usually shadows it on `PATH`. A plain lookup would find the wrapper
//! again, so every invocation records itself in a [`SearchChain`] and the
//! search skips any match that is already in the chain.
//!
//! ## Architecture
//!
//! - `types`: Diagnostics and errors (`Attempt`, `AttemptOutcome`, `ResolveError`)
//! - `chain`: The `COMPOSE_RESOLVE` chain and its serialization
//! - `fs`: Filesystem probes (injectable for testing)
//! - `search`: First-match lookup over a slice of `PATH` directories
//! - `resolve`: The chain-aware walk over the search path

mod chain;
mod fs;
mod resolve;
mod search;
mod types;

pub use chain::SearchChain;
pub use fs::{FsProvider, SystemFs};
pub use resolve::{Resolution, TARGET_TOOL, resolve_target, resolve_with_deps};
pub use types::{Attempt, AttemptOutcome, ResolveError};

