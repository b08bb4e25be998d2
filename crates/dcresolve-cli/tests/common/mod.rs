//! Shared fixtures for the wrapper integration tests.

#![allow(dead_code)]

use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Stand-in for the real docker-compose.
///
/// `... -f FILE config` prints a header naming its working directory
/// followed by the file, or fails if the file contains FAIL. Any other call
/// prints its arguments and the contents of every `-f` file, then exits with
/// `$FAKE_EXIT`. With `$FAKE_READY` set, the delegated call creates that file
/// and sleeps for two seconds before reading its `-f` files.
const FAKE_TOOL: &str = r##"#!/bin/sh
prev=""
file=""
for arg in "$@"; do
  if [ "$prev" = "-f" ]; then file="$arg"; fi
  prev="$arg"
done
if [ "$prev" = "config" ]; then
  if grep -q FAIL "$file"; then
    echo "invalid compose file $file" >&2
    exit 1
  fi
  echo "# rendered in $PWD"
  cat "$file"
  exit 0
fi
echo "ARGS: $*"
echo "COMPOSE_FILE=${COMPOSE_FILE-<unset>}"
echo "COMPOSE_RESOLVE=${COMPOSE_RESOLVE-<unset>}"
if [ -n "$FAKE_READY" ]; then
  : > "$FAKE_READY"
  sleep 2
fi
prev=""
for arg in "$@"; do
  if [ "$prev" = "-f" ]; then
    echo "--- $arg"
    cat "$arg"
  fi
  prev="$arg"
done
exit "${FAKE_EXIT:-0}"
"##;

/// Executables shared by every test, installed once per test process.
///
/// They live under cargo's target tmp dir, so runs reuse one directory.
/// All executables are in place before any test spawns a process, so no
/// child can inherit a handle that is still open for writing.
pub struct Toolbox {
    /// Holds the fake docker-compose.
    pub real_dir: PathBuf,
    /// Two directories each holding a copy of the wrapper binary.
    pub shadow_dirs: [PathBuf; 2],
    /// A directory without any docker-compose.
    pub empty_dir: PathBuf,
}

pub fn toolbox() -> &'static Toolbox {
    static TOOLBOX: OnceLock<Toolbox> = OnceLock::new();
    TOOLBOX.get_or_init(|| {
        let base = Path::new(env!("CARGO_TARGET_TMPDIR")).join("dcresolve-cli-tests");
        let base = create_dir(&base).canonicalize().unwrap();

        let real_dir = create_dir(&base.join("real"));
        install(&real_dir.join("docker-compose"), |staged| {
            std::fs::write(staged, FAKE_TOOL).unwrap();
        });

        let shadow_dirs = ["shadow1", "shadow2"].map(|name| {
            let dir = create_dir(&base.join(name));
            install(&dir.join("docker-compose"), |staged| {
                std::fs::copy(wrapper_bin(), staged).unwrap();
            });
            dir
        });

        Toolbox {
            real_dir,
            shadow_dirs,
            empty_dir: create_dir(&base.join("empty")),
        }
    })
}

/// Write an executable under a staging name and rename it over `dest`, so a
/// copy left by an earlier run is replaced rather than rewritten in place.
fn install(dest: &Path, write: impl FnOnce(&Path)) {
    let staged = dest.with_extension(format!("staged-{}", std::process::id()));
    write(&staged);
    std::fs::set_permissions(&staged, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::rename(&staged, dest).unwrap();
}

fn create_dir(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    dir.to_path_buf()
}

pub fn wrapper_bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_docker-compose"))
}

/// A throwaway project directory with its own temp root.
pub struct Project {
    _dir: TempDir,
    pub root: PathBuf,
    pub tmp: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        toolbox();
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let tmp = create_dir(&root.join("tmp"));
        Self {
            _dir: dir,
            root,
            tmp,
        }
    }

    /// Write `<dir>/docker-compose.yml` and return its path relative to the root.
    pub fn compose(&self, dir: &str, body: &str) -> String {
        let path = create_dir(&self.root.join(dir)).join("docker-compose.yml");
        std::fs::write(path, body).unwrap();
        format!("{dir}/docker-compose.yml")
    }

    /// Entries left behind in the temp root.
    pub fn leftovers(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.tmp)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    /// Run `program` from the project root with `path_dirs` (plus the system
    /// directories) as PATH.
    pub fn run_with(
        &self,
        program: &Path,
        path_dirs: &[&PathBuf],
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Output {
        let mut path: Vec<PathBuf> = path_dirs.iter().map(|d| (*d).clone()).collect();
        path.push(PathBuf::from("/usr/bin"));
        path.push(PathBuf::from("/bin"));
        self.run_raw(program, std::env::join_paths(path).unwrap(), args, env)
    }

    /// Run the wrapper with the fake tool first on PATH.
    pub fn run(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        self.run_with(wrapper_bin(), &[&toolbox().real_dir], args, env)
    }

    pub fn run_raw(&self, program: &Path, path: OsString, args: &[&str], env: &[(&str, &str)]) -> Output {
        self.command(program, path, args, env).output().unwrap()
    }

    /// Start the wrapper with the fake tool first on PATH, capturing its output.
    pub fn spawn(&self, args: &[&str], env: &[(&str, &str)]) -> Child {
        let path = std::env::join_paths([
            toolbox().real_dir.clone(),
            PathBuf::from("/usr/bin"),
            PathBuf::from("/bin"),
        ])
        .unwrap();
        self.command(wrapper_bin(), path, args, env)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
    }

    fn command(&self, program: &Path, path: OsString, args: &[&str], env: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.root)
            .env("PATH", path)
            .env("TMPDIR", &self.tmp)
            .env_remove("COMPOSE_FILE")
            .env_remove("COMPOSE_RESOLVE")
            .env_remove("COMPOSE_RESOLVE_DEBUG")
            .env_remove("RUST_LOG")
            .env_remove("FAKE_EXIT")
            .env_remove("FAKE_READY");
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Arguments the fake tool received in delegate mode.
pub fn delegated_args(output: &Output) -> Vec<String> {
    let out = stdout(output);
    let line = out
        .lines()
        .find_map(|l| l.strip_prefix("ARGS: "))
        .unwrap_or_else(|| panic!("no delegated call in output:\n{out}"));
    line.split_whitespace().map(String::from).collect()
}

/// Values following each `-f` in `args`.
pub fn file_args(args: &[String]) -> Vec<String> {
    args.windows(2)
        .filter(|pair| pair[0] == "-f")
        .map(|pair| pair[1].clone())
        .collect()
}

/// The `# rendered in` headers of the delegated files, in order.
pub fn rendered_dirs(output: &Output) -> Vec<String> {
    stdout(output)
        .lines()
        .filter_map(|l| l.strip_prefix("# rendered in "))
        .map(String::from)
        .collect()
}

/// Block until `path` exists.
pub fn wait_for(path: &Path) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !path.exists() {
        assert!(Instant::now() < deadline, "{} never appeared", path.display());
        std::thread::sleep(Duration::from_millis(20));
    }
}
