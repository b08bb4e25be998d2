#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod compose;
pub mod env;
pub mod paths;
pub mod resolver;

// Re-export the types the CLI wires together
pub use compose::{ComposeError, ResolvedFileSet, compose_files};
pub use env::{EnvProvider, Settings, SystemEnv};
pub use resolver::{Resolution, ResolveError, SearchChain, TARGET_TOOL, resolve_target};
