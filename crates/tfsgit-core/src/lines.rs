//! Grammars for the text shapes the bridge reads from git.
//!
//! Every parser here is a pure function of one record. A record that does
//! not have the expected shape yields `None`; nothing in this module fails.
//!
//! Shapes:
//!
//! | Shape                 | Example                                                          |
//! |-----------------------|------------------------------------------------------------------|
//! | configuration record  | `tfs-remote.default.url\nhttp://tfs:8080/tfs` (`config -z`)      |
//! | commit header         | `commit 4b825dc642cb6eb9a060e54bf8d69288fbee4904`                |
//! | changeset footer      | `    git-tfs-id: url=http://tfs; repository=$/Proj; changeset=42` |
//! | tree listing record   | `100644 blob 4b825dc642cb6eb9a060e54bf8d69288fbee4904\tREADME.md` |

use crate::object::ObjectType;
use crate::object_id::{ObjectId, is_object_id};

/// Default configuration section under which remotes are stored.
pub const DEFAULT_REMOTE_NAMESPACE: &str = "tfs-remote";

// ---------------------------------------------------------------------------
// Configuration entries
// ---------------------------------------------------------------------------

/// One `<namespace>.<remote_id>.<key>` entry of `git config --list -z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry<'a> {
    pub remote_id: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

/// Parses one NUL-delimited configuration record belonging to `namespace`.
///
/// A record is the key name, a newline, then the value verbatim (which may
/// itself span lines). Keys given without a value have no newline and are
/// skipped. The remote id may contain dots; the key is whatever follows the
/// last dot of the name.
pub fn parse_config_record<'a>(record: &'a str, namespace: &str) -> Option<ConfigEntry<'a>> {
    let (name, value) = record.split_once('\n')?;
    let rest = name.strip_prefix(namespace)?.strip_prefix('.')?;
    let (remote_id, key) = rest.rsplit_once('.')?;
    if remote_id.is_empty() || key.is_empty() {
        return None;
    }
    Some(ConfigEntry {
        remote_id,
        key,
        value,
    })
}

// ---------------------------------------------------------------------------
// Commit headers
// ---------------------------------------------------------------------------

/// Parses the `commit <hash>` line that opens each entry of `git log`.
///
/// Anything after the hash must be separated by whitespace (e.g. the
/// `(from ...)` suffix some log formats append).
pub fn parse_commit_header(line: &str) -> Option<ObjectId> {
    let rest = line.strip_prefix("commit ")?;
    let (hash, tail) = rest.split_at_checked(crate::object_id::OBJECT_ID_HEX_LEN)?;
    if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
        return None;
    }
    ObjectId::parse(hash).ok()
}

// ---------------------------------------------------------------------------
// Changeset footers
// ---------------------------------------------------------------------------

/// The changeset reference embedded in a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangesetFooter<'a> {
    pub url: &'a str,
    pub repository: &'a str,
    pub changeset_id: u64,
}

const URL_FIELD: &str = "url=";
const REPOSITORY_FIELD: &str = "; repository=";
const CHANGESET_FIELD: &str = "; changeset=";

/// Finds a `url=<U>; repository=<P>; changeset=<N>` reference in a line.
///
/// `url=` must begin the line or follow whitespace or a `:` (as in a
/// `git-tfs-id:` trailer). The changeset number must be followed by the end
/// of the line or by whitespace.
pub fn parse_changeset_footer(line: &str) -> Option<ChangesetFooter<'_>> {
    let start = find_url_field(line)?;
    let fields = &line[start + URL_FIELD.len()..];

    let (url, rest) = fields.split_once(REPOSITORY_FIELD)?;
    let (repository, rest) = rest.split_once(CHANGESET_FIELD)?;
    if url.is_empty() || repository.is_empty() {
        return None;
    }

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(digits_end);
    if digits.is_empty() || !tail.trim().is_empty() {
        return None;
    }
    let changeset_id = digits.parse().ok()?;

    Some(ChangesetFooter {
        url,
        repository,
        changeset_id,
    })
}

fn find_url_field(line: &str) -> Option<usize> {
    line.match_indices(URL_FIELD).map(|(i, _)| i).find(|&i| {
        line[..i]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || c == ':')
    })
}

// ---------------------------------------------------------------------------
// Tree listings
// ---------------------------------------------------------------------------

/// One record of `git ls-tree -z` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    pub mode: &'a str,
    pub object_type: ObjectType,
    pub sha: &'a str,
    pub path: &'a str,
}

/// Parses the first NUL-terminated record of `git ls-tree -z` output.
///
/// Entries whose type is neither `blob` nor `tree` (submodule commits) do
/// not match.
pub fn parse_tree_entry(listing: &str) -> Option<TreeEntry<'_>> {
    let record = listing.split('\0').next()?;
    let (meta, path) = record.split_once('\t')?;
    if path.is_empty() {
        return None;
    }

    let mut parts = meta.split(' ');
    let mode = parts.next()?;
    let object_type = parts.next()?.parse().ok()?;
    let sha = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if mode.len() != 6 || !mode.bytes().all(|b| b.is_ascii_digit()) || !is_object_id(sha) {
        return None;
    }

    Some(TreeEntry {
        mode,
        object_type,
        sha,
        path,
    })
}
