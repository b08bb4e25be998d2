//! Compose file composition.
//!
//! Files from `COMPOSE_FILE` and the `-f` flags are merged, made absolute
//! and de-duplicated (last occurrence wins). Each surviving file is then
//! rendered by the target tool's `config` command from inside the file's
//! own directory, so relative references in it resolve against that
//! directory rather than the caller's. The rendered output is
//! location-independent and can be passed to the target tool from anywhere.

mod error;
mod file_list;
mod render;

pub use error::ComposeError;
pub use file_list::{composite_file_list, dedupe_last_wins};
pub use render::{ResolvedFileSet, compose_files, render_files, render_files_in};
