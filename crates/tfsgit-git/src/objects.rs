//! Reading and writing objects in git's object database.

use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tfsgit_core::lines::parse_tree_entry;
use tfsgit_core::{ObjectId, ObjectRef};
use tracing::debug;

use crate::commands::{GitError, GitRunner, Result};
use crate::repository::GitRepository;

impl<R: GitRunner> GitRepository<R> {
    /// Resolves `path` in the tree of `commit`.
    ///
    /// Returns `Ok(None)` without running git when either argument is missing
    /// or empty, and when `path` does not exist at `commit`.
    pub fn lookup(&self, commit: Option<&str>, path: Option<&str>) -> Result<Option<ObjectRef>> {
        let (Some(commit), Some(path)) = (
            commit.filter(|c| !c.is_empty()),
            path.filter(|p| !p.is_empty()),
        ) else {
            return Ok(None);
        };

        let listing = self
            .runner
            .run(&["ls-tree", "-z", "--full-tree", commit, "--", path])?;
        let object = parse_tree_entry(&listing).and_then(|e| ObjectRef::from_tree_entry(&e, commit));
        if object.is_none() {
            debug!(commit, path, "no object at path");
        }
        Ok(object)
    }

    /// Writes everything `content` yields as a new blob and returns its id.
    ///
    /// The content is staged in a temporary file that is removed before this
    /// returns, whether or not git succeeds.
    pub fn insert_reader(&self, content: &mut dyn Read) -> Result<ObjectId> {
        let mut staged = NamedTempFile::new().map_err(GitError::TempFile)?;
        io::copy(content, &mut staged).map_err(GitError::TempFile)?;
        staged.flush().map_err(GitError::TempFile)?;
        self.insert_file(staged.path())
    }

    /// Writes `content` as a new blob and returns its id.
    pub fn insert_bytes(&self, content: &[u8]) -> Result<ObjectId> {
        self.insert_reader(&mut &*content)
    }

    /// Writes the file at `path` as a new blob, byte for byte, and returns its id.
    pub fn insert_file(&self, path: &Path) -> Result<ObjectId> {
        let path = path.to_string_lossy();
        let output = self
            .runner
            .run(&["hash-object", "-w", "--no-filters", "--", &path])?;
        let hash = output.trim();
        let id = ObjectId::parse(hash).map_err(|_| GitError::MalformedOutput {
            command: "hash-object".to_string(),
            output: hash.to_string(),
        })?;
        debug!(%id, path = %path, "inserted blob");
        Ok(id)
    }
}
