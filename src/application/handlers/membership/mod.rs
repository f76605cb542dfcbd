//! Membership record handlers.
//!
//! Manage the membership record the replay gate reads from local storage.
//!
//! ## Commands
//! - Importing a verified membership record
//! - Clearing the stored record
//!
//! ## Queries
//! - Reading the stored record

mod clear_membership;
mod errors;
mod get_stored_membership;
mod import_membership;

pub use errors::MembershipRecordError;

// Commands
pub use clear_membership::ClearMembershipHandler;
pub use import_membership::{
    ImportMembershipCommand, ImportMembershipHandler, ImportMembershipResult,
};

// Queries
pub use get_stored_membership::{GetStoredMembershipHandler, StoredMembership};
