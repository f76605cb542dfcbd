//! ClearMembershipHandler - Command handler for removing the stored membership.

use std::sync::Arc;

use crate::ports::{keys, LocalStore};

use super::MembershipRecordError;

/// Handler for clearing the stored membership and its auth token.
pub struct ClearMembershipHandler {
    store: Arc<dyn LocalStore>,
}

impl ClearMembershipHandler {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<(), MembershipRecordError> {
        self.store.remove(keys::VERIFIED_USER).await?;
        self.store.remove(keys::AUTH_TOKEN).await?;
        tracing::info!("Membership record cleared");
        Ok(())
    }
}
