//! Authentication
//!
//! Resolves presented credentials to an identity handle before any object
//! operation runs.

pub mod credentials;
pub mod gate;

pub use credentials::{Credentials, parse_basic_authorization};
pub use gate::{AuthenticationGate, PasswordGate};
