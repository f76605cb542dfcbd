//! Foundation module - Shared domain primitives.
//!
//! Contains the timestamp value object and the validation error type
//! shared by the membership and access-code domains.

mod errors;
mod timestamp;

pub use errors::ValidationError;
pub use timestamp::Timestamp;
