//! Concurrent rendering of compose files into a temporary workspace.

use super::error::ComposeError;
use super::file_list::composite_file_list;
use crate::env::{CHAIN_VAR, COMPOSE_FILE_VAR, PWD_VAR};
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Rendered compose files, owned together with the directory holding them.
///
/// Dropping the set removes the directory and everything in it.
#[derive(Debug)]
pub struct ResolvedFileSet {
    workspace: TempDir,
    files: Vec<PathBuf>,
}

impl ResolvedFileSet {
    /// Directory holding the rendered files.
    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    /// Rendered files, in the order of the de-duplicated input list.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Remove the workspace, logging instead of failing if that goes wrong.
    pub fn close(self) {
        let path = self.workspace.path().to_path_buf();
        if let Err(e) = self.workspace.close() {
            warn!("Failed to remove temp dir {}: {}", path.display(), e);
        }
    }
}

/// One file to render: the compose file and the output it is written to.
struct RenderJob {
    index: usize,
    input: PathBuf,
    dir: PathBuf,
    output: File,
}

/// Merge, de-duplicate and render compose files.
///
/// `env_files` are the `COMPOSE_FILE` entries and `flag_files` the `-f`
/// values, both as given by the user. Relative paths resolve against the
/// process working directory.
pub async fn compose_files(
    tool: &Path,
    chain: &OsStr,
    env_files: &[PathBuf],
    flag_files: &[PathBuf],
) -> Result<ResolvedFileSet, ComposeError> {
    let cwd = std::env::current_dir().map_err(ComposeError::CurrentDir)?;
    let files = composite_file_list(env_files, flag_files, &cwd);
    render_files(tool, chain, &files).await
}

/// Render already absolute, de-duplicated files under the system temp root.
pub async fn render_files(
    tool: &Path,
    chain: &OsStr,
    files: &[PathBuf],
) -> Result<ResolvedFileSet, ComposeError> {
    render_files_in(&std::env::temp_dir(), tool, chain, files).await
}

/// Render files into a fresh workspace created under `root`.
///
/// Every file is rendered by its own `<tool> -f <file> config` subprocess,
/// run in the file's directory. All subprocesses run concurrently and all
/// are awaited, even after one fails; the first failure to complete is
/// returned and the workspace is removed.
pub async fn render_files_in(
    root: &Path,
    tool: &Path,
    chain: &OsStr,
    files: &[PathBuf],
) -> Result<ResolvedFileSet, ComposeError> {
    let workspace = tempfile::Builder::new()
        .prefix("dcresolve-")
        .tempdir_in(root)
        .map_err(ComposeError::Workspace)?;

    let mut jobs = Vec::with_capacity(files.len());
    let mut outputs = Vec::with_capacity(files.len());
    for (index, input) in files.iter().enumerate() {
        let dir = input
            .parent()
            .ok_or_else(|| ComposeError::NoParent(input.clone()))?
            .to_path_buf();
        let path = workspace.path().join(output_name(index, input));
        let output = File::create(&path).map_err(|source| ComposeError::OutputFile {
            path: path.clone(),
            source,
        })?;
        outputs.push(path);
        jobs.push(RenderJob {
            index,
            input: input.clone(),
            dir,
            output,
        });
    }

    let mut tasks = JoinSet::new();
    for job in jobs {
        let tool = tool.to_path_buf();
        let chain = chain.to_os_string();
        tasks.spawn(render_one(tool, chain, job));
    }

    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        let result = joined.map_err(ComposeError::from).and_then(|r| r);
        if let Err(e) = result {
            debug!("render failed: {}", e);
            first_error.get_or_insert(e);
        }
    }

    if let Some(e) = first_error {
        let path = workspace.path().to_path_buf();
        if let Err(cleanup) = workspace.close() {
            warn!("Failed to remove temp dir {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }

    Ok(ResolvedFileSet {
        workspace,
        files: outputs,
    })
}

async fn render_one(tool: PathBuf, chain: OsString, job: RenderJob) -> Result<(), ComposeError> {
    let RenderJob {
        index,
        input,
        dir,
        output,
    } = job;

    let command_line = format!("{} -f {} config", tool.display(), input.display());
    debug!(index, dir = %dir.display(), "resolve: {}", command_line);

    let mut cmd = Command::new(&tool);
    cmd.arg("-f")
        .arg(&input)
        .arg("config")
        .current_dir(&dir)
        .env(PWD_VAR, &dir)
        .env(CHAIN_VAR, &chain)
        .env_remove(COMPOSE_FILE_VAR)
        .stdin(Stdio::null())
        .stdout(Stdio::from(output))
        .stderr(Stdio::piped());

    let spawn_error = |source: std::io::Error| ComposeError::Spawn {
        command: command_line.clone(),
        dir: dir.clone(),
        source,
    };
    // stdout goes straight to the output file; only stderr is collected
    let child = cmd.spawn().map_err(spawn_error)?;
    let result = child.wait_with_output().await.map_err(spawn_error)?;

    if !result.status.success() {
        return Err(ComposeError::RenderFailed {
            command: command_line,
            dir,
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }

    Ok(())
}

/// Output file name: input position plus the original file name.
fn output_name(index: usize, input: &Path) -> String {
    let name = input
        .file_name()
        .map_or_else(|| "compose.yml".into(), |n| n.to_string_lossy());
    format!("{index:03}-{name}")
}
