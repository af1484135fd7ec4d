//! Filesystem-backed identity store
//!
//! An identity exists iff `<data_root>/<username>/` is a directory. Inside it
//! live the credential file `.user` and the `images/` namespace directory.
//! Nothing is cached: every check goes back to the filesystem.

use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::IdentityError;
use crate::identity::credentials;
use crate::identity::results::VerifyOutcome;
use crate::identity::validation::is_valid_username;
use crate::storage::ObjectNamespace;
use crate::storage::filesystem::directory_exists;

/// File inside the identity directory holding the password hash
pub const CREDENTIAL_FILE: &str = ".user";

/// Subdirectory of the identity directory holding the user's images
pub const NAMESPACE_DIR: &str = "images";

/// A username whose directory existed when it was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHandle {
    name: String,
    root: PathBuf,
}

impl IdentityHandle {
    fn new(data_root: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            root: data_root.join(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<data_root>/<name>`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<data_root>/<name>/.user`
    pub fn credential_path(&self) -> PathBuf {
        self.root.join(CREDENTIAL_FILE)
    }

    /// `<data_root>/<name>/images`
    pub fn namespace_path(&self) -> PathBuf {
        self.root.join(NAMESPACE_DIR)
    }

    /// The object namespace owned by this identity
    pub fn namespace(&self) -> ObjectNamespace {
        ObjectNamespace::new(self.namespace_path())
    }
}

/// Identity directories rooted at the configured data root
#[derive(Debug, Clone)]
pub struct IdentityStore {
    data_root: PathBuf,
}

impl IdentityStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_root(config.data_root_path())
    }

    pub fn with_root(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Returns true if `username` is valid and its directory exists.
    pub fn exists(&self, username: &str) -> bool {
        is_valid_username(username) && directory_exists(&self.data_root.join(username))
    }

    /// Resolve a username to a handle, if the identity exists.
    pub fn resolve(&self, username: &str) -> Result<IdentityHandle, IdentityError> {
        if !is_valid_username(username) {
            return Err(IdentityError::InvalidInput(format!(
                "invalid username: {username:?}"
            )));
        }

        let handle = IdentityHandle::new(&self.data_root, username);
        if directory_exists(handle.root()) {
            Ok(handle)
        } else {
            Err(IdentityError::NotFound(username.to_string()))
        }
    }

    /// Create the identity directory, its image namespace and its credential.
    ///
    /// Not transactional: if the identity directory is created but a later
    /// step fails, the directory is left behind and the error is returned.
    pub fn provision(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<IdentityHandle, IdentityError> {
        let Some(password) = password else {
            return Err(IdentityError::InvalidInput("password is required".into()));
        };

        if !is_valid_username(username) {
            return Err(IdentityError::InvalidInput(format!(
                "invalid username: {username:?}"
            )));
        }

        let handle = IdentityHandle::new(&self.data_root, username);
        if handle.root().exists() {
            return Err(IdentityError::AlreadyExists(username.to_string()));
        }

        // create_dir, not create_dir_all: a missing data root is a failure
        fs::create_dir(handle.root()).map_err(|e| {
            warn!("Failed to create directory for user {}: {}", username, e);
            match e.kind() {
                ErrorKind::AlreadyExists => IdentityError::AlreadyExists(username.to_string()),
                _ => IdentityError::io(format!("create {}", handle.root().display()), e),
            }
        })?;

        let namespace_path = handle.namespace_path();
        if !directory_exists(&namespace_path) {
            fs::create_dir(&namespace_path).map_err(|e| {
                warn!("Failed to create image directory for user {}: {}", username, e);
                IdentityError::io(format!("create {}", namespace_path.display()), e)
            })?;
        }

        write_credential(&handle, password)?;

        info!("Provisioned user {} at {}", username, handle.root().display());
        Ok(handle)
    }

    /// Check a password against the stored credential.
    ///
    /// Unknown users, invalid names and unreadable credential files are all
    /// `Rejected`.
    pub fn verify(&self, username: &str, password: &str) -> VerifyOutcome {
        let handle = match self.resolve(username) {
            Ok(handle) => handle,
            Err(_) => return VerifyOutcome::Rejected,
        };

        let stored = match fs::read(handle.credential_path()) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read credential for user {}: {}", username, e);
                return VerifyOutcome::Rejected;
            }
        };

        if credentials::matches(password, &stored) {
            VerifyOutcome::Authenticated
        } else {
            VerifyOutcome::Rejected
        }
    }

    /// Replace the stored credential of an existing identity.
    pub fn rotate_password(&self, username: &str, new_password: &str) -> Result<(), IdentityError> {
        let handle = self.resolve(username)?;
        write_credential(&handle, new_password)?;
        info!("Rotated password for user {}", username);
        Ok(())
    }
}

/// Overwrite the credential file wholesale with the hash of `password`.
fn write_credential(handle: &IdentityHandle, password: &str) -> Result<(), IdentityError> {
    let path = handle.credential_path();
    fs::write(&path, credentials::hash_password(password)).map_err(|e| {
        warn!("Failed to write credential for user {}: {}", handle.name(), e);
        IdentityError::io(format!("write {}", path.display()), e)
    })
}
