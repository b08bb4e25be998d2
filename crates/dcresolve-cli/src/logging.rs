//! Tracing setup.
//!
//! Diagnostics go to stderr only; stdout belongs to the delegated tool.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Filter directives: debug when `COMPOSE_RESOLVE_DEBUG` is set, else `RUST_LOG`, else warn.
pub fn filter_directives(debug: bool, rust_log: Option<&str>) -> String {
    match (debug, rust_log) {
        (true, _) => "debug".to_string(),
        (false, Some(directives)) if !directives.trim().is_empty() => directives.to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(debug: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(debug, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}
