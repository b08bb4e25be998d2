//! The single delegated call to the genuine target tool.

use crate::parser::ComposeArgs;
use anyhow::Context;
use dcresolve_core::env::{CHAIN_VAR, COMPOSE_FILE_VAR};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};
use tracing::debug;

/// Argument list for the delegated call after file composition.
///
/// Global flags other than `-f` come first, then one `-f` per rendered
/// file, then the subcommand and its arguments.
pub fn rewrite_args(parsed: &ComposeArgs, files: &[PathBuf]) -> Vec<OsString> {
    let mut args = parsed.passthrough_flags();
    for file in files {
        args.push("-f".into());
        args.push(file.clone().into_os_string());
    }
    args.extend(parsed.args.iter().cloned());
    args
}

/// A prepared call to the target tool with inherited stdio.
#[derive(Debug, Clone)]
pub struct Delegation {
    program: PathBuf,
    args: Vec<OsString>,
    chain: OsString,
}

impl Delegation {
    pub fn new(program: &Path, chain: OsString, args: Vec<OsString>) -> Self {
        Self {
            program: program.to_path_buf(),
            args,
            chain,
        }
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The command as it will be spawned.
    ///
    /// `COMPOSE_FILE` is removed because its entries are already explicit
    /// `-f` flags, and the chain is exported for nested invocations.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env(CHAIN_VAR, &self.chain)
            .env_remove(COMPOSE_FILE_VAR)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Run to completion and return the tool's exit code.
    ///
    /// Termination signals arriving while the child runs are absorbed; the
    /// wrapper keeps waiting so the child's code is still returned.
    pub async fn run(&self) -> anyhow::Result<i32> {
        debug!("call: {}", self.display());
        let mut signals = HeldSignals::install().context("failed to install signal handlers")?;
        let mut child = self
            .command()
            .spawn()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        let status = loop {
            tokio::select! {
                status = child.wait() => {
                    break status
                        .with_context(|| format!("failed to wait for {}", self.program.display()))?;
                }
                name = signals.recv() => debug!("{name} received, waiting for the child to exit"),
            }
        };
        Ok(exit_code(status))
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Signals that would otherwise kill the wrapper before its child.
///
/// A terminal delivers them to the whole foreground process group, so the
/// child sees them too and decides for itself how to exit.
#[cfg(unix)]
struct HeldSignals {
    interrupt: Signal,
    terminate: Signal,
    hangup: Signal,
}

#[cfg(unix)]
impl HeldSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
            _ = self.hangup.recv() => "SIGHUP",
        }
    }
}

#[cfg(not(unix))]
struct HeldSignals;

#[cfg(not(unix))]
impl HeldSignals {
    #[allow(clippy::unnecessary_wraps)]
    fn install() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> &'static str {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        "Ctrl-C"
    }
}

/// Exit code to propagate for a finished child.
///
/// A child killed by a signal reports `128 + signal`, as shells do.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn strings(values: &[OsString]) -> Vec<String> {
        values
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_rewrite_replaces_file_flags() {
        let parsed = ComposeArgs::try_parse_from([
            "docker-compose",
            "-f",
            "a/docker-compose.yml",
            "--project-name",
            "demo",
            "-f",
            "b/docker-compose.yml",
            "up",
            "-d",
        ])
        .unwrap();
        let files = [
            PathBuf::from("/tmp/dcresolve-x/000-docker-compose.yml"),
            PathBuf::from("/tmp/dcresolve-x/001-docker-compose.yml"),
        ];

        assert_eq!(
            strings(&rewrite_args(&parsed, &files)),
            vec![
                "--project-name=demo",
                "-f",
                "/tmp/dcresolve-x/000-docker-compose.yml",
                "-f",
                "/tmp/dcresolve-x/001-docker-compose.yml",
                "up",
                "-d",
            ]
        );
    }

    #[test]
    fn test_rewrite_without_files() {
        let parsed = ComposeArgs::try_parse_from(["docker-compose", "ps"]).unwrap();
        assert_eq!(strings(&rewrite_args(&parsed, &[])), vec!["ps"]);
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let delegation = Delegation::new(
            Path::new("/usr/bin/docker-compose"),
            OsString::new(),
            vec!["-f".into(), "/tmp/x.yml".into(), "up".into()],
        );
        assert_eq!(delegation.display(), "/usr/bin/docker-compose -f /tmp/x.yml up");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_propagates_exit_code() {
        let delegation = Delegation::new(
            Path::new("/bin/sh"),
            OsString::new(),
            vec!["-c".into(), "exit 7".into()],
        );
        assert_eq!(delegation.run().await.unwrap(), 7);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_maps_to_128_plus_signal() {
        let delegation = Delegation::new(
            Path::new("/bin/sh"),
            OsString::new(),
            vec!["-c".into(), "kill -TERM $$".into()],
        );
        assert_eq!(delegation.run().await.unwrap(), 128 + 15);
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let delegation = Delegation::new(
            Path::new("/nonexistent/docker-compose"),
            OsString::new(),
            Vec::new(),
        );
        let err = delegation.run().await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to start /nonexistent/docker-compose"));
    }
}
