//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! - `replay` - Replay access gate over the stored membership
//! - `membership` - Import, read and clear the stored membership record
//! - `admin` - Admin login session
//! - `codes` - Access code administration

pub mod admin;
pub mod codes;
pub mod membership;
pub mod replay;
