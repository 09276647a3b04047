//! Content hashes of git objects.
//!
//! An [`ObjectId`] is the 40-character lowercase hexadecimal SHA-1 name git
//! gives to every blob, tree, and commit. Construction validates the syntax,
//! so holding an `ObjectId` means holding a well-formed hash.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of hex digits in a full object name.
pub const OBJECT_ID_HEX_LEN: usize = 40;

/// Error returned when a string is not a full object name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    #[error("object id must be {OBJECT_ID_HEX_LEN} hex digits (got {0})")]
    WrongLength(usize),

    #[error("object id contains non-hex character {0:?}")]
    NotHex(char),
}

/// A validated 40-hex-digit git object name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parses a full object name.
    ///
    /// Upper-case hex digits are accepted and normalised to lower case, which
    /// is the form git itself prints.
    pub fn parse(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != OBJECT_ID_HEX_LEN {
            return Err(ObjectIdError::WrongLength(s.len()));
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ObjectIdError::NotHex(bad));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional 7-character abbreviation.
    pub fn short(&self) -> &str {
        &self.0[..7]
    }
}

/// Returns `true` if `s` is a full object name.
pub fn is_object_id(s: &str) -> bool {
    s.len() == OBJECT_ID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = ObjectIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
