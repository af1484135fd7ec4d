//! Identity store
//!
//! Maps usernames onto per-user directories under the data root and manages
//! the hashed password kept in each of them.

pub mod credentials;
pub mod results;
pub mod store;
pub mod validation;

pub use results::VerifyOutcome;
pub use store::{IdentityHandle, IdentityStore};
pub use validation::is_valid_username;
