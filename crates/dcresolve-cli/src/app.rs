//! One wrapper invocation, end to end.
//!
//! An outermost invocation resolves the genuine tool, renders the compose
//! files and delegates with rewritten arguments. A nested invocation (the
//! inherited chain is non-empty) only resolves and forwards its arguments
//! unchanged, since an outer wrapper already rewrote them.

use crate::delegate::{Delegation, rewrite_args};
use crate::error::CliError;
use crate::parser::ComposeArgs;
use clap::Parser;
use dcresolve_core::{Settings, compose_files, resolve_target};
use std::ffi::OsString;
use tracing::debug;

/// Run the wrapper with `argv` (program name first) and return the exit code.
pub async fn run(argv: Vec<OsString>, settings: &Settings) -> Result<i32, CliError> {
    let parsed = ComposeArgs::try_parse_from(&argv)?;

    let resolution = resolve_target(settings)?;
    let chain = resolution.chain.to_env_value()?;

    if settings.is_nested() {
        debug!(
            chain_len = resolution.chain.len(),
            "nested invocation, forwarding arguments unchanged"
        );
        let raw = argv.into_iter().skip(1).collect();
        let delegation = Delegation::new(&resolution.executable, chain, raw);
        return Ok(delegation.run().await?);
    }

    let resolved = compose_files(
        &resolution.executable,
        &chain,
        &settings.compose_files,
        &parsed.files,
    )
    .await?;

    let delegation = Delegation::new(
        &resolution.executable,
        chain,
        rewrite_args(&parsed, resolved.files()),
    );
    let result = delegation.run().await;

    // The rendered files must outlive the child
    resolved.close();

    Ok(result?)
}
