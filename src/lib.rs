//! RAX image server
//!
//! Per-user image storage on a plain directory tree: one directory per
//! user holding a hashed password and an `images/` folder, served over HTTP.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod server;
pub mod service;
pub mod storage;

pub use auth::{AuthenticationGate, Credentials, PasswordGate};
pub use config::StoreConfig;
pub use error::{IdentityError, ObjectError, ServerError};
pub use identity::{IdentityHandle, IdentityStore, VerifyOutcome};
pub use server::Server;
pub use service::ObjectService;
pub use storage::ObjectNamespace;
