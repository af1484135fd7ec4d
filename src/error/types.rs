//! Error types
//!
//! Defines domain-specific error types for the identity store, the object
//! namespace and the HTTP server.

use std::fmt;
use std::io;

/// Identity store errors
#[derive(Debug)]
pub enum IdentityError {
    /// A required field was omitted or a name failed validation
    InvalidInput(String),
    NotFound(String),
    AlreadyExists(String),
    /// Credential verification failed; never says which half was wrong
    Unauthenticated,
    Io { context: String, source: io::Error },
}

impl IdentityError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        IdentityError::Io {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::InvalidInput(s) => write!(f, "Invalid input: {}", s),
            IdentityError::NotFound(u) => write!(f, "User not found: {}", u),
            IdentityError::AlreadyExists(u) => write!(f, "User already exists: {}", u),
            IdentityError::Unauthenticated => write!(f, "Invalid username or password"),
            IdentityError::Io { context, source } => write!(f, "IO error ({}): {}", context, source),
        }
    }
}

impl std::error::Error for IdentityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IdentityError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Object namespace and object service errors
#[derive(Debug)]
pub enum ObjectError {
    InvalidName(String),
    InvalidExtension(String),
    AlreadyExists(String),
    NotFound(String),
    Io { context: String, source: io::Error },
}

impl ObjectError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        ObjectError::Io {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectError::InvalidName(n) => write!(f, "Invalid image name: {}", n),
            ObjectError::InvalidExtension(n) => write!(f, "Invalid image extension: {}", n),
            ObjectError::AlreadyExists(n) => write!(f, "Image already exists: {}", n),
            ObjectError::NotFound(n) => write!(f, "Image not found: {}", n),
            ObjectError::Io { context, source } => write!(f, "IO error ({}): {}", context, source),
        }
    }
}

impl std::error::Error for ObjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjectError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum ServerError {
    Identity(IdentityError),
    Object(ObjectError),
    Config(config::ConfigError),
    IoError(io::Error),
    /// Malformed request that never reached the core
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Identity(e) => write!(f, "Identity error: {}", e),
            ServerError::Object(e) => write!(f, "Image error: {}", e),
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
            ServerError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ServerError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<IdentityError> for ServerError {
    fn from(error: IdentityError) -> Self {
        ServerError::Identity(error)
    }
}

impl From<ObjectError> for ServerError {
    fn from(error: ObjectError) -> Self {
        ServerError::Object(error)
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
