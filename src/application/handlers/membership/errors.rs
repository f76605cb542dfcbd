//! Errors for managing the stored membership record.

use crate::ports::StoreError;

/// Errors from membership record handlers.
#[derive(Debug, thiserror::Error)]
pub enum MembershipRecordError {
    /// The input is not a JSON object with the record's shape.
    #[error("Invalid membership record: {0}")]
    InvalidRecord(String),

    #[error("Membership storage failed: {0}")]
    Store(#[from] StoreError),
}
