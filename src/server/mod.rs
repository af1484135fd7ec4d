//! HTTP server
//!
//! Wires the identity store and object service behind an axum router.

pub mod core;
pub mod extract;
pub mod handlers;
pub mod router;

pub use core::Server;
pub use extract::AppState;
pub use router::build_router;
