//! Git command execution.
//!
//! [`GitRunner`] is the seam between the bridge and the `git` binary: the
//! registry builder, history scanner, and object store bridge only ever talk
//! to git through it. [`GitProcess`] is the real implementation; tests swap in
//! scripted runners.

use std::io::{self, BufRead, BufReader, Read};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running git or interpreting its results.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be found or spawned, or its output could not be read.
    #[error("failed to execute git: {0}")]
    SpawnError(#[from] io::Error),

    /// The git command exited with a non-zero status.
    #[error("git {command} failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The git subcommand that failed.
        command: String,
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// No remote with the given id is configured.
    #[error("unable to locate tfs remote with id = {0}")]
    RemoteNotFound(String),

    /// No remote tracks the given server path.
    #[error("unable to locate tfs remote with url = {url}, repository = {repository}")]
    RemoteNotFoundByUrl {
        url: String,
        repository: String,
    },

    /// Git printed something other than what the command documents.
    #[error("unexpected output from git {command}: {output:?}")]
    MalformedOutput {
        command: String,
        output: String,
    },

    /// Content could not be staged in a temporary file.
    #[error("failed to write temporary file: {0}")]
    TempFile(#[source] io::Error),
}

/// A specialized `Result` type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;

// ---------------------------------------------------------------------------
// Runner seam
// ---------------------------------------------------------------------------

/// Runs git subcommands.
pub trait GitRunner {
    /// Runs `git <args>` and returns everything it wrote to stdout.
    ///
    /// # Errors
    ///
    /// [`GitError::CommandFailed`] if git exits with a non-zero status.
    fn run(&self, args: &[&str]) -> Result<String>;

    /// Runs `git <args>` and hands each stdout line to `on_line` as it arrives.
    ///
    /// Returning `Break` from `on_line` stops reading; the process is then
    /// terminated and its exit status is not checked. Otherwise a non-zero
    /// exit is reported as [`GitError::CommandFailed`] after every line git
    /// produced has been delivered.
    fn run_streaming(
        &self,
        args: &[&str],
        on_line: &mut dyn FnMut(&str) -> ControlFlow<()>,
    ) -> Result<()>;
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String> {
        (**self).run(args)
    }

    fn run_streaming(
        &self,
        args: &[&str],
        on_line: &mut dyn FnMut(&str) -> ControlFlow<()>,
    ) -> Result<()> {
        (**self).run_streaming(args, on_line)
    }
}

// ---------------------------------------------------------------------------
// Process-backed runner
// ---------------------------------------------------------------------------

/// Runs the `git` binary as a child process in a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitProcess {
    binary: PathBuf,
    work_dir: PathBuf,
}

impl GitProcess {
    /// Creates a runner that invokes `git` from `PATH` inside `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: PathBuf::from("git"),
            work_dir: work_dir.into(),
        }
    }

    /// Uses a different git executable.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!(?args, dir = %self.work_dir.display(), "running git");
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).current_dir(&self.work_dir).stdin(Stdio::null());
        cmd
    }
}

impl GitRunner for GitProcess {
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.command(args).output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: subcommand(args),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_streaming(
        &self,
        args: &[&str],
        on_line: &mut dyn FnMut(&str) -> ControlFlow<()>,
    ) -> Result<()> {
        let mut child = self
            .command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain stderr on its own thread so a chatty child cannot block on a
        // full pipe while we are still reading stdout.
        let stderr = child.stderr.take();
        let stderr_reader = thread::spawn(move || {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr {
                let _ = pipe.read_to_string(&mut buf);
            }
            buf
        });

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("git stdout was not captured"))?;

        let mut stopped = false;
        let mut read_error = None;
        for line in BufReader::new(stdout).split(b'\n') {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            };
            let text = String::from_utf8_lossy(&line);
            if on_line(text.strip_suffix('\r').unwrap_or(&text)).is_break() {
                stopped = true;
                break;
            }
        }

        if stopped || read_error.is_some() {
            // The child may still be writing; it has nobody left to read.
            let _ = child.kill();
        }
        let status = child.wait()?;
        let stderr = stderr_reader.join().unwrap_or_default();

        if let Some(e) = read_error {
            return Err(e.into());
        }
        if stopped {
            debug!(?args, "stopped reading git output early");
            return Ok(());
        }
        if !status.success() {
            return Err(GitError::CommandFailed {
                command: subcommand(args),
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Names the subcommand in `args` for error messages.
fn subcommand(args: &[&str]) -> String {
    args.iter()
        .find(|a| !a.starts_with('-'))
        .copied()
        .unwrap_or("")
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
