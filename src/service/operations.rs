//! Object service operations
//!
//! Each call performs one filesystem read or write. There is no locking:
//! concurrent writers to the same image race and the last write wins.

use log::{info, warn};

use crate::config::StoreConfig;
use crate::error::ObjectError;
use crate::identity::IdentityHandle;
use crate::service::results::{DeleteOutcome, Download, ImageListing, ReplaceOutcome, UploadOutcome};
use crate::storage::ObjectNamespace;

/// Image operations scoped to one resolved identity
#[derive(Debug, Clone)]
pub struct ObjectService {
    owner: String,
    namespace: ObjectNamespace,
    allowed_extensions: Vec<String>,
}

impl ObjectService {
    pub fn new(identity: &IdentityHandle, config: &StoreConfig) -> Self {
        Self::with_extensions(identity, config.allowed_extensions.clone())
    }

    pub fn with_extensions(identity: &IdentityHandle, allowed_extensions: Vec<String>) -> Self {
        Self {
            owner: identity.name().to_string(),
            namespace: identity.namespace(),
            allowed_extensions,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.namespace.exists(name)
    }

    /// List the owner's images.
    pub fn list(&self) -> Result<ImageListing, ObjectError> {
        Ok(ImageListing {
            username: self.owner.clone(),
            images: self.namespace.list()?,
        })
    }

    /// Store `content` under `name`.
    ///
    /// An existing image is only replaced when `overwrite` is set; otherwise
    /// nothing is written.
    pub fn upload(
        &self,
        name: &str,
        content: &[u8],
        overwrite: bool,
    ) -> Result<UploadOutcome, ObjectError> {
        if !self
            .namespace
            .validate_extension(name, &self.allowed_extensions)
        {
            warn!("User {} uploaded {} with a disallowed extension", self.owner, name);
            return Err(ObjectError::InvalidExtension(name.to_string()));
        }

        if self.namespace.exists(name) && !overwrite {
            return Err(ObjectError::AlreadyExists(name.to_string()));
        }

        self.namespace.write(name, content)?;
        info!(
            "User {} uploaded {} ({} bytes, overwrite={})",
            self.owner,
            name,
            content.len(),
            overwrite
        );
        Ok(UploadOutcome::Created)
    }

    /// Fetch the full content of `name`.
    pub fn download(&self, name: &str) -> Result<Download, ObjectError> {
        if !self.namespace.exists(name) {
            return Err(ObjectError::NotFound(name.to_string()));
        }

        let content = self.namespace.read(name)?;
        Ok(Download {
            name: name.to_string(),
            content,
        })
    }

    /// Overwrite an existing image.
    ///
    /// The extension is not re-checked: only names that passed `upload` can
    /// exist, unless placed out of band.
    pub fn replace(&self, name: &str, content: &[u8]) -> Result<ReplaceOutcome, ObjectError> {
        if !self.namespace.exists(name) {
            return Err(ObjectError::NotFound(name.to_string()));
        }

        self.namespace.write(name, content)?;
        info!("User {} replaced {} ({} bytes)", self.owner, name, content.len());
        Ok(ReplaceOutcome::Replaced)
    }

    /// Remove `name`.
    pub fn delete(&self, name: &str) -> Result<DeleteOutcome, ObjectError> {
        if !self.namespace.exists(name) {
            return Err(ObjectError::NotFound(name.to_string()));
        }

        self.namespace.remove(name)?;
        info!("User {} deleted {}", self.owner, name);
        Ok(DeleteOutcome::Deleted)
    }
}
