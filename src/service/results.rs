//! Object service result types
//!
//! Defines the success values returned by object service operations.

use serde::Serialize;

/// Successful upload. Overwriting an existing image also reports `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
}

/// Content of a downloaded image plus how it should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub name: String,
    pub content: Vec<u8>,
}

impl Download {
    /// Generic image media type; the stored bytes are never sniffed
    pub const CONTENT_TYPE: &'static str = "image/*";

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.name)
    }
}

/// Listing of a user's images
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageListing {
    pub username: String,
    pub images: Vec<String>,
}
