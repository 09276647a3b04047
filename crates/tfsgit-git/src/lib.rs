//! Git plumbing for the tfsgit bridge.
//!
//! This crate runs git on behalf of the bridge: it folds `git config` output
//! into remote descriptors, scans `git log` for changeset footers, and
//! resolves and writes objects. All of it goes through the [`GitRunner`]
//! seam in [`commands`].

pub mod commands;
pub mod gitdir;
pub mod history;
pub mod objects;
pub mod remotes;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::{GitError, GitProcess, GitRunner, Result};
pub use repository::GitRepository;
