//! ImportMembershipHandler - Command handler for storing a verified membership.
//!
//! Stands in for the external verification flow: it writes the record
//! and its auth token where the replay gate reads them.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::membership::MembershipRecord;
use crate::ports::{keys, LocalStore};

use super::MembershipRecordError;

/// Command to store a membership record given as raw JSON.
#[derive(Debug, Clone)]
pub struct ImportMembershipCommand {
    pub raw_json: String,
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportMembershipResult {
    pub record: MembershipRecord,
    /// Whether the auth token key was written as well.
    pub token_stored: bool,
}

/// Handler for importing a membership record.
///
/// The record is stored verbatim so fields the policy does not read
/// survive the round trip.
pub struct ImportMembershipHandler {
    store: Arc<dyn LocalStore>,
}

impl ImportMembershipHandler {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ImportMembershipCommand,
    ) -> Result<ImportMembershipResult, MembershipRecordError> {
        let value: Value = serde_json::from_str(cmd.raw_json.trim())
            .map_err(|e| MembershipRecordError::InvalidRecord(e.to_string()))?;
        if !value.is_object() {
            return Err(MembershipRecordError::InvalidRecord(
                "expected a JSON object".to_string(),
            ));
        }
        let record: MembershipRecord = serde_json::from_value(value.clone())
            .map_err(|e| MembershipRecordError::InvalidRecord(e.to_string()))?;

        self.store
            .set(keys::VERIFIED_USER, &value.to_string())
            .await?;

        let token_stored = match record.token() {
            Some(token) => {
                self.store.set(keys::AUTH_TOKEN, token).await?;
                true
            }
            None => false,
        };

        tracing::info!(
            plan = record.raw_plan_type().unwrap_or("-"),
            token_stored,
            "Membership record imported"
        );

        Ok(ImportMembershipResult {
            record,
            token_stored,
        })
    }
}
