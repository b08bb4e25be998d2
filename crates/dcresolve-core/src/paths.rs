//! Lexical path absolutization.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Join `path` onto `base` (unless already absolute) and clean the result.
///
/// Purely lexical: symlinks are not resolved and the path need not exist.
/// `.` components are dropped and `..` removes the preceding component.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}

/// [`absolutize`] against the process working directory.
pub fn absolutize_from_cwd(path: &Path) -> io::Result<PathBuf> {
    Ok(absolutize(&std::env::current_dir()?, path))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
