//! `docker-compose` wrapper entry point.
//!
//! Exit codes: the delegated tool's own code, 2 for usage errors of the
//! wrapper's flags, 1 for any other failure.

use std::process::ExitCode;

use dcresolve_cli::{logging, run};
use dcresolve_core::{Settings, SystemEnv};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = Settings::from_env(&SystemEnv);
    logging::init(settings.debug);

    let code = match run(std::env::args_os().collect(), &settings).await {
        Ok(code) => code,
        Err(err) => {
            err.report();
            err.exit_code()
        }
    };

    ExitCode::from(u8::try_from(code.rem_euclid(256)).unwrap_or(1))
}
