#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// tempfile is a dev-dependency of the integration tests; the unit tests
// in this lib target don't use it
#[cfg(test)]
use tempfile as _;

pub mod app;
pub mod delegate;
pub mod error;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use app::run;
pub use delegate::{Delegation, rewrite_args};
pub use error::CliError;
pub use parser::ComposeArgs;
