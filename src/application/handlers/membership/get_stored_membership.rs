//! GetStoredMembershipHandler - Query handler for the stored membership record.

use std::sync::Arc;

use crate::domain::membership::MembershipRecord;
use crate::ports::{keys, LocalStore};

use super::MembershipRecordError;

/// What is currently stored under the membership key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredMembership {
    Absent,
    Readable(MembershipRecord),
    /// Something is stored but it is not a valid record.
    Unreadable { raw: String },
}

/// Handler for reading the stored membership.
pub struct GetStoredMembershipHandler {
    store: Arc<dyn LocalStore>,
}

impl GetStoredMembershipHandler {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<StoredMembership, MembershipRecordError> {
        let stored = match self.store.get(keys::VERIFIED_USER).await? {
            None => StoredMembership::Absent,
            Some(raw) => match MembershipRecord::from_json(&raw) {
                Ok(record) => StoredMembership::Readable(record),
                Err(_) => StoredMembership::Unreadable { raw },
            },
        };
        Ok(stored)
    }
}
