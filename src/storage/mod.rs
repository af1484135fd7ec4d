//! Object storage
//!
//! Per-user image directories and the name checks applied to their entries.

pub mod filesystem;
pub mod namespace;
pub mod validation;

pub use namespace::ObjectNamespace;
pub use validation::{is_addressable_name, is_safe_object_name, validate_extension};
