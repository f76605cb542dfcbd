//! Admin session handlers.
//!
//! The admin console only opens while the login marker is stored.

mod session;

pub use session::{AdminSession, AdminSessionError};
