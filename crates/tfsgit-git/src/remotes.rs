//! Reading remote descriptors out of git configuration.

use tfsgit_core::{RemoteDescriptor, RemoteRegistry};
use tracing::debug;

use crate::commands::{GitError, GitRunner, Result};
use crate::repository::GitRepository;

impl<R: GitRunner> GitRepository<R> {
    /// Lists configuration and folds every remote entry into a registry.
    ///
    /// The listing is NUL-delimited so values containing newlines stay whole.
    pub fn read_registry(&self) -> Result<RemoteRegistry> {
        let namespace = self.remote_namespace.as_str();
        let listing = self.runner.run(&["config", "--list", "-z"])?;
        let registry = RemoteRegistry::from_config_listing(namespace, &listing);
        debug!(count = registry.len(), namespace, "read tfs remotes");
        Ok(registry)
    }

    /// Returns every configured remote, ordered by id.
    pub fn read_all_remotes(&self) -> Result<Vec<RemoteDescriptor>> {
        Ok(self.read_registry()?.into_remotes())
    }

    /// Returns the remote with the given id.
    ///
    /// # Errors
    ///
    /// [`GitError::RemoteNotFound`] if no such remote is configured.
    pub fn read_remote(&self, id: &str) -> Result<RemoteDescriptor> {
        self.read_registry()?
            .get(id)
            .cloned()
            .ok_or_else(|| GitError::RemoteNotFound(id.to_string()))
    }

    /// Returns the first remote (in id order) tracking `repository` on `url`.
    ///
    /// # Errors
    ///
    /// [`GitError::RemoteNotFoundByUrl`] if no remote matches both values.
    pub fn read_remote_by_url(&self, url: &str, repository: &str) -> Result<RemoteDescriptor> {
        self.read_registry()?
            .find_by_url(url, repository)
            .cloned()
            .ok_or_else(|| GitError::RemoteNotFoundByUrl {
                url: url.to_string(),
                repository: repository.to_string(),
            })
    }
}
