//! Remote descriptors and the registry folded from configuration entries.
//!
//! A remote descriptor names a link from the local repository to a path in
//! a remote change-tracking server. Descriptors are stored in git
//! configuration as
//!
//! ```text
//! tfs-remote.<id>.url=<server url>
//! tfs-remote.<id>.repository=<server path>
//! tfs-remote.<id>.username=<user>
//! ```
//!
//! [`RemoteRegistry`] is built by folding the records of
//! `git config --list -z` in the order git prints them. Later entries for the
//! same id and key replace earlier ones.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::lines::{ConfigEntry, parse_config_record};

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// A named link to a remote server path.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDescriptor {
    id: String,

    /// Server endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Server-side path this remote tracks (e.g. `$/Project/Main`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Never serialized and redacted from `Debug` output.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl RemoteDescriptor {
    /// Creates a descriptor with no fields set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            username: None,
            repository: None,
            password: None,
        }
    }

    /// The registry key of this remote.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if both the url and the repository path equal the given values.
    pub fn matches(&self, url: &str, repository: &str) -> bool {
        self.url.as_deref() == Some(url) && self.repository.as_deref() == Some(repository)
    }

    fn set(&mut self, key: RemoteKey, value: &str) {
        let slot = match key {
            RemoteKey::Url => &mut self.url,
            RemoteKey::Username => &mut self.username,
            RemoteKey::Repository => &mut self.repository,
            RemoteKey::Password => &mut self.password,
        };
        *slot = Some(value.to_string());
    }
}

impl fmt::Debug for RemoteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteDescriptor")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("repository", &self.repository)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration keys that map onto descriptor fields.
///
/// Any other key under a remote (for example `fetch`) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKey {
    Url,
    Username,
    Repository,
    Password,
}

impl RemoteKey {
    /// Maps a configuration key name to a field, ignoring ASCII case.
    pub fn from_config_key(key: &str) -> Option<Self> {
        const KEYS: [(&str, RemoteKey); 4] = [
            ("url", RemoteKey::Url),
            ("username", RemoteKey::Username),
            ("repository", RemoteKey::Repository),
            ("password", RemoteKey::Password),
        ];
        KEYS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, k)| *k)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// All remotes found in one configuration listing, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRegistry {
    remotes: BTreeMap<String, RemoteDescriptor>,
}

impl RemoteRegistry {
    /// Folds a whole NUL-delimited configuration listing into a registry.
    pub fn from_config_listing(namespace: &str, listing: &str) -> Self {
        listing
            .split('\0')
            .fold(Self::default(), |registry, record| {
                registry.fold_record(namespace, record)
            })
    }

    /// Applies one raw record; records outside `namespace` leave the registry unchanged.
    pub fn fold_record(self, namespace: &str, record: &str) -> Self {
        match parse_config_record(record, namespace) {
            Some(entry) => self.fold_entry(&entry),
            None => self,
        }
    }

    /// Applies one parsed configuration entry.
    pub fn fold_entry(mut self, entry: &ConfigEntry<'_>) -> Self {
        let remote = self
            .remotes
            .entry(entry.remote_id.to_string())
            .or_insert_with(|| RemoteDescriptor::new(entry.remote_id));

        match RemoteKey::from_config_key(entry.key) {
            Some(key) => remote.set(key, entry.value),
            None => trace!(remote = entry.remote_id, key = entry.key, "ignoring remote key"),
        }
        self
    }

    /// Looks up a remote by id.
    pub fn get(&self, id: &str) -> Option<&RemoteDescriptor> {
        self.remotes.get(id)
    }

    /// Returns the first remote, in id order, tracking `repository` on `url`.
    pub fn find_by_url(&self, url: &str, repository: &str) -> Option<&RemoteDescriptor> {
        self.iter().find(|r| r.matches(url, repository))
    }

    /// Iterates over remotes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &RemoteDescriptor> {
        self.remotes.values()
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    /// Consumes the registry, returning remotes in id order.
    pub fn into_remotes(self) -> Vec<RemoteDescriptor> {
        self.remotes.into_values().collect()
    }
}
