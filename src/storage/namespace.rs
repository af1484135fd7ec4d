//! Object namespace
//!
//! One user's `images/` directory. Directory entries are the set of stored
//! objects; there is no separate index.

use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ObjectError;
use crate::storage::filesystem::file_exists;
use crate::storage::validation::{is_safe_object_name, validate_extension};

/// Directory of named binary objects owned by one identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNamespace {
    path: PathBuf,
}

impl ObjectNamespace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the entries directly inside the namespace, sorted.
    pub fn list(&self) -> Result<Vec<String>, ObjectError> {
        let entries = fs::read_dir(&self.path).map_err(|e| {
            error!("Failed to list {}: {}", self.path.display(), e);
            ObjectError::io(format!("list {}", self.path.display()), e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| ObjectError::io(format!("list {}", self.path.display()), e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        debug!("Listed {} ({} entries)", self.path.display(), names.len());
        Ok(names)
    }

    /// Returns true if a regular file called `name` is stored here.
    pub fn exists(&self, name: &str) -> bool {
        is_safe_object_name(name) && file_exists(&self.path.join(name))
    }

    /// Suffix match of `name` against the allow-list.
    pub fn validate_extension<S: AsRef<str>>(&self, name: &str, allowed_extensions: &[S]) -> bool {
        validate_extension(name, allowed_extensions)
    }

    /// Path of `name` inside the namespace, refusing names that would escape it.
    pub fn object_path(&self, name: &str) -> Result<PathBuf, ObjectError> {
        if is_safe_object_name(name) {
            Ok(self.path.join(name))
        } else {
            Err(ObjectError::InvalidName(name.to_string()))
        }
    }

    /// Read the full content of `name`.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ObjectError> {
        let path = self.object_path(name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ObjectError::NotFound(name.to_string()),
            _ => ObjectError::io(format!("read {}", path.display()), e),
        })
    }

    /// Write `content` to `name`, truncating whatever was there.
    pub fn write(&self, name: &str, content: &[u8]) -> Result<(), ObjectError> {
        let path = self.object_path(name)?;
        fs::write(&path, content).map_err(|e| ObjectError::io(format!("write {}", path.display()), e))
    }

    /// Remove `name` from the namespace.
    pub fn remove(&self, name: &str) -> Result<(), ObjectError> {
        let path = self.object_path(name)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ObjectError::NotFound(name.to_string()),
            _ => ObjectError::io(format!("remove {}", path.display()), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn namespace() -> (TempDir, ObjectNamespace) {
        let dir = TempDir::new().unwrap();
        let ns = ObjectNamespace::new(dir.path());
        (dir, ns)
    }

    #[test]
    fn list_reflects_directory_entries() {
        let (dir, ns) = namespace();
        assert!(ns.list().unwrap().is_empty());

        fs::write(dir.path().join("b.png"), b"b").unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        assert_eq!(ns.list().unwrap(), vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn list_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let ns = ObjectNamespace::new(dir.path().join("gone"));
        assert!(matches!(ns.list(), Err(ObjectError::Io { .. })));
    }

    #[test]
    fn exists_only_for_regular_files() {
        let (dir, ns) = namespace();
        fs::write(dir.path().join("a.png"), b"a").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();
        assert!(ns.exists("a.png"));
        assert!(!ns.exists("sub.png"));
        assert!(!ns.exists("missing.png"));
        assert!(!ns.exists("../a.png"));
    }

    #[test]
    fn object_path_stays_inside_namespace() {
        let (dir, ns) = namespace();
        assert_eq!(ns.object_path("a.png").unwrap(), dir.path().join("a.png"));
        assert!(matches!(ns.object_path(".."), Err(ObjectError::InvalidName(_))));
        assert!(matches!(ns.object_path("x/y.png"), Err(ObjectError::InvalidName(_))));
    }

    #[test]
    fn read_write_remove() {
        let (_dir, ns) = namespace();
        ns.write("a.png", b"first").unwrap();
        ns.write("a.png", b"2nd").unwrap();
        assert_eq!(ns.read("a.png").unwrap(), b"2nd");

        ns.remove("a.png").unwrap();
        assert!(matches!(ns.read("a.png"), Err(ObjectError::NotFound(_))));
        assert!(matches!(ns.remove("a.png"), Err(ObjectError::NotFound(_))));
    }
}
