//! References to objects located in a commit's tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lines::TreeEntry;
use crate::object_id::ObjectId;

/// The kinds of tree entry the bridge resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Blob,
    Tree,
}

impl ObjectType {
    /// Returns the name git uses for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an object type name other than `blob` or `tree`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported object type: {0}")]
pub struct UnknownObjectType(pub String);

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Self::Blob),
            "tree" => Ok(Self::Tree),
            other => Err(UnknownObjectType(other.to_string())),
        }
    }
}

/// An object found at `path` in the tree of `commit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Six-digit octal mode as printed by git (e.g. `100644`, `040000`).
    pub mode: String,
    pub sha: ObjectId,
    pub object_type: ObjectType,
    pub path: String,
    /// The commit-ish the lookup was made against, exactly as requested.
    pub commit: String,
}

impl ObjectRef {
    /// Builds a reference from a parsed tree listing record.
    ///
    /// Returns `None` if the record's hash is not a full object name.
    pub fn from_tree_entry(entry: &TreeEntry<'_>, commit: &str) -> Option<Self> {
        Some(Self {
            mode: entry.mode.to_string(),
            sha: ObjectId::parse(entry.sha).ok()?,
            object_type: entry.object_type,
            path: entry.path.to_string(),
            commit: commit.to_string(),
        })
    }
}
