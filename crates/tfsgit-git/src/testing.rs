//! Test doubles shared by this crate's unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::path::Path;

use tempfile::TempDir;
use tfsgit_core::ObjectId;

use crate::commands::{GitError, GitProcess, GitRunner, Result};

/// A scratch repository with a deterministic identity.
pub(crate) struct TestRepo {
    dir: TempDir,
    git: GitProcess,
}

impl TestRepo {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let git = GitProcess::new(dir.path());
        git.run(&["init", "-q"]).unwrap();
        git.run(&["config", "user.name", "Test"]).unwrap();
        git.run(&["config", "user.email", "test@example.com"]).unwrap();
        git.run(&["config", "commit.gpgsign", "false"]).unwrap();
        Self { dir, git }
    }

    pub(crate) fn git(&self) -> &GitProcess {
        &self.git
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn config(&self, key: &str, value: &str) {
        self.git.run(&["config", key, value]).unwrap();
    }

    /// Creates an empty commit and returns its id.
    pub(crate) fn commit(&self, message: &str) -> ObjectId {
        self.git
            .run(&["commit", "-q", "--allow-empty", "-m", message])
            .unwrap();
        self.head()
    }

    /// Writes `contents` to `path`, stages it, and commits.
    pub(crate) fn commit_file(&self, path: &str, contents: &str, message: &str) -> ObjectId {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, contents).unwrap();
        self.git.run(&["add", "--", path]).unwrap();
        self.commit(message)
    }

    pub(crate) fn head(&self) -> ObjectId {
        let out = self.git.run(&["rev-parse", "HEAD"]).unwrap();
        ObjectId::parse(out.trim()).unwrap()
    }
}

/// Renders `key=value` entries the way `git config --list -z` prints them.
pub(crate) fn config_listing(entries: &[&str]) -> String {
    entries
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) => format!("{key}\n{value}\0"),
            None => format!("{entry}\0"),
        })
        .collect()
}

/// What a scripted subcommand prints and how it exits.
#[derive(Debug, Clone)]
struct Reply {
    stdout: String,
    failure: Option<(i32, String)>,
}

/// A [`GitRunner`] that answers from a script keyed by subcommand and
/// records every call.
#[derive(Debug, Default)]
pub(crate) struct ScriptedGit {
    replies: HashMap<String, Reply>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes `subcommand` succeed with `stdout`.
    pub(crate) fn on(mut self, subcommand: &str, stdout: impl Into<String>) -> Self {
        self.replies.insert(
            subcommand.to_string(),
            Reply {
                stdout: stdout.into(),
                failure: None,
            },
        );
        self
    }

    /// Makes `subcommand` exit with `code` after printing nothing.
    pub(crate) fn failing(mut self, subcommand: &str, code: i32, stderr: &str) -> Self {
        self.replies.insert(
            subcommand.to_string(),
            Reply {
                stdout: String::new(),
                failure: Some((code, stderr.to_string())),
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    fn reply(&self, args: &[&str]) -> Reply {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());
        let subcommand = args.first().copied().unwrap_or_default();
        self.replies
            .get(subcommand)
            .cloned()
            .unwrap_or_else(|| panic!("unexpected git call: {args:?}"))
    }

    fn failure(args: &[&str], code: i32, stderr: String) -> GitError {
        GitError::CommandFailed {
            command: args.first().copied().unwrap_or_default().to_string(),
            code: Some(code),
            stderr,
        }
    }
}

impl GitRunner for ScriptedGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let reply = self.reply(args);
        match reply.failure {
            Some((code, stderr)) => Err(Self::failure(args, code, stderr)),
            None => Ok(reply.stdout),
        }
    }

    fn run_streaming(
        &self,
        args: &[&str],
        on_line: &mut dyn FnMut(&str) -> ControlFlow<()>,
    ) -> Result<()> {
        let reply = self.reply(args);
        for line in reply.stdout.lines() {
            if on_line(line).is_break() {
                return Ok(());
            }
        }
        match reply.failure {
            Some((code, stderr)) => Err(Self::failure(args, code, stderr)),
            None => Ok(()),
        }
    }
}
