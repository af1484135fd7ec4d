//! File system probes
//!
//! Existence checks shared by the identity store and the object namespace.

use std::path::Path;

/// Check if file exists
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.is_dir()
}
