//! Global flags of the wrapped `docker-compose`.
//!
//! Only `-f/--file` means anything to the wrapper. The other global flags
//! are parsed so they can be told apart from the subcommand and written
//! back out unchanged when the call is delegated.

use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line interface of the wrapper, mirroring docker-compose's globals.
///
/// Help and version flags belong to the wrapped tool, so clap's own are
/// disabled and `-h`/`-v` are passed through like any other flag.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "docker-compose")]
#[command(about = "docker-compose wrapper that resolves compose files relative to their own directories")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct ComposeArgs {
    /// Specify an alternate compose file
    #[arg(short = 'f', long = "file", value_name = "FILE", action = ArgAction::Append)]
    pub files: Vec<PathBuf>,

    /// Specify an alternate project name
    #[arg(short = 'p', long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Specify a context name
    #[arg(short = 'c', long = "context", value_name = "NAME")]
    pub context: Option<String>,

    /// Show more output
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Set log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Do not print ANSI control characters
    #[arg(long = "no-ansi")]
    pub no_ansi: bool,

    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Help information
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Daemon socket to connect to
    #[arg(short = 'H', long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Use TLS; implied by --tlsverify
    #[arg(long = "tls")]
    pub tls: bool,

    /// Trust certs signed only by this CA
    #[arg(long = "tlscacert", value_name = "CA_PATH")]
    pub tls_ca_cert: Option<String>,

    /// Path to TLS certificate file
    #[arg(long = "tlscert", value_name = "CLIENT_CERT_PATH")]
    pub tls_cert: Option<String>,

    /// Path to TLS key file
    #[arg(long = "tlskey", value_name = "TLS_KEY_PATH")]
    pub tls_key: Option<String>,

    /// Use TLS and verify the remote
    #[arg(long = "tlsverify")]
    pub tls_verify: bool,

    /// Don't check the daemon's hostname against the name in the client certificate
    #[arg(long = "skip-hostname-check")]
    pub skip_hostname_check: bool,

    /// Specify an alternate working directory
    #[arg(long = "project-directory", value_name = "PATH")]
    pub project_directory: Option<String>,

    /// Convert keys in v3 files to their non-Swarm equivalent
    #[arg(long = "compatibility")]
    pub compatibility: bool,

    /// Specify an alternate environment file
    #[arg(long = "env-file", value_name = "PATH")]
    pub env_file: Option<String>,

    /// Subcommand and its arguments, forwarded untouched
    #[arg(value_name = "COMMAND", num_args = 1.., trailing_var_arg = true)]
    pub args: Vec<OsString>,
}

impl ComposeArgs {
    /// Re-serialize every global flag that was set, except `-f/--file`.
    pub fn passthrough_flags(&self) -> Vec<OsString> {
        let switches = [
            ("verbose", self.verbose),
            ("no-ansi", self.no_ansi),
            ("version", self.version),
            ("help", self.help),
            ("tls", self.tls),
            ("tlsverify", self.tls_verify),
            ("skip-hostname-check", self.skip_hostname_check),
            ("compatibility", self.compatibility),
        ];
        let values = [
            ("project-name", &self.project_name),
            ("context", &self.context),
            ("log-level", &self.log_level),
            ("host", &self.host),
            ("tlscacert", &self.tls_ca_cert),
            ("tlscert", &self.tls_cert),
            ("tlskey", &self.tls_key),
            ("project-directory", &self.project_directory),
            ("env-file", &self.env_file),
        ];

        let mut flags: Vec<OsString> = values
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| format!("--{name}={v}").into()))
            .collect();
        flags.extend(
            switches
                .into_iter()
                .filter(|(_, set)| *set)
                .map(|(name, _)| format!("--{name}").into()),
        );
        flags
    }
}
