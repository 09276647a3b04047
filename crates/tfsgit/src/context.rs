//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the resolved
//! working tree, the loaded configuration, and the global output flags.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tfsgit_config::{BridgeConfig, load_config};
use tfsgit_git::gitdir::find_work_tree;
use tfsgit_git::{GitProcess, GitRepository};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Root of the git working tree (or the start directory outside one).
    pub work_tree: PathBuf,

    pub config: BridgeConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The start directory is `-C` if given, else the current directory. The
    /// working tree is the nearest ancestor holding `.git`; outside a
    /// repository the start directory is used as-is and git reports the
    /// problem itself.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let start = match &global.directory {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("failed to read current directory")?,
        };
        let work_tree = resolve_work_tree(&start);
        let config = load_config(&work_tree)
            .with_context(|| format!("failed to load configuration for {}", work_tree.display()))?;

        Ok(Self {
            work_tree,
            config,
            json: global.json,
            quiet: global.quiet,
        })
    }

    /// Opens the working tree with the configured git binary and namespace.
    pub fn repository(&self) -> GitRepository<GitProcess> {
        let process = GitProcess::new(&self.work_tree).with_binary(&self.config.git_binary);
        GitRepository::new(process).with_remote_namespace(&self.config.remote_namespace)
    }
}

fn resolve_work_tree(start: &Path) -> PathBuf {
    find_work_tree(start).unwrap_or_else(|| start.to_path_buf())
}
