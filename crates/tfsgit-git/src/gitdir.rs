//! Locating the working tree a command should run in.

use std::path::{Path, PathBuf};

/// Walks up from `start` to the nearest directory containing a `.git` entry.
///
/// `.git` may be a directory (regular clone) or a file (worktree or
/// submodule). Returns `None` if `start` cannot be canonicalised or no
/// ancestor has one. This never runs git.
pub fn find_work_tree(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
