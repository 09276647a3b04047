//! [`GitRepository`], the entry point for every bridge operation.
//!
//! Operations are split across modules by concern:
//!
//! - [`crate::remotes`]: remote enumeration and lookup
//! - [`crate::history`]: changeset info for a head
//! - [`crate::objects`]: object lookup and insertion
//!
//! Nothing is cached between calls; every operation runs git afresh.

use std::path::PathBuf;

use tfsgit_core::lines::DEFAULT_REMOTE_NAMESPACE;

use crate::commands::{GitProcess, GitRunner};

/// A git working copy seen through a [`GitRunner`].
#[derive(Debug, Clone)]
pub struct GitRepository<R = GitProcess> {
    pub(crate) runner: R,
    pub(crate) remote_namespace: String,
}

impl GitRepository<GitProcess> {
    /// Opens the working copy at `work_dir` using `git` from `PATH`.
    pub fn open(work_dir: impl Into<PathBuf>) -> Self {
        Self::new(GitProcess::new(work_dir))
    }
}

impl<R: GitRunner> GitRepository<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            remote_namespace: DEFAULT_REMOTE_NAMESPACE.to_string(),
        }
    }

    /// Reads remotes from a configuration section other than `tfs-remote`.
    pub fn with_remote_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.remote_namespace = namespace.into();
        self
    }

    pub fn remote_namespace(&self) -> &str {
        &self.remote_namespace
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
