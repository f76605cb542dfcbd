//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamp, validation errors)
//! - `membership` - Replay access policy over stored memberships
//! - `access_code` - Access codes, filtering, search and pagination

pub mod access_code;
pub mod foundation;
pub mod membership;
