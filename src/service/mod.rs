//! Object service
//!
//! Upload, download, replace and delete of images in one user's namespace,
//! with the overwrite policy applied on upload.

pub mod operations;
pub mod results;

pub use operations::ObjectService;
pub use results::{DeleteOutcome, Download, ImageListing, ReplaceOutcome, UploadOutcome};
