//! CheckReplayAccessHandler - Query handler for the replay access gate.
//!
//! Reads the stored membership, runs the access policy and, when the
//! membership has lapsed, purges it from the store.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::{
    AccessDecision, AccessPolicyEvaluator, DenialReason, MembershipRecord, RemainingValidity,
};
use crate::ports::{keys, LocalStore, StoreError};

/// Title shown above every replay.
pub const REPLAY_TITLE: &str = "Replay Live Stream JKT48";

/// Query to check replay access.
#[derive(Debug, Clone)]
pub struct CheckReplayAccessQuery {
    pub playback_id: String,
    pub now: Timestamp,
}

/// Everything the player needs once access is granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayView {
    pub playback_id: String,
    pub title: String,
    /// Reported to the player as the viewer identity.
    pub viewer_id: String,
    pub plan_label: String,
    pub remaining: RemainingValidity,
    pub expires_at: Timestamp,
    pub email: String,
}

/// Result of a replay access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayAccess {
    Granted(ReplayView),
    Denied(DenialReason),
}

impl ReplayAccess {
    pub fn is_granted(&self) -> bool {
        matches!(self, ReplayAccess::Granted(_))
    }
}

/// Errors from the replay access check.
#[derive(Debug, thiserror::Error)]
pub enum ReplayAccessError {
    #[error("Failed to read membership: {0}")]
    Store(#[from] StoreError),
}

impl ReplayAccessError {
    /// Message shown on the replay screen.
    pub fn user_message(&self) -> &'static str {
        "Terjadi kesalahan saat memeriksa akses. Silakan coba lagi."
    }
}

/// Handler for checking replay access.
pub struct CheckReplayAccessHandler {
    store: Arc<dyn LocalStore>,
    evaluator: AccessPolicyEvaluator,
}

impl CheckReplayAccessHandler {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            evaluator: AccessPolicyEvaluator::new(),
        }
    }

    pub async fn handle(
        &self,
        query: CheckReplayAccessQuery,
    ) -> Result<ReplayAccess, ReplayAccessError> {
        let playback_id = query.playback_id.trim();
        if playback_id.is_empty() {
            return Ok(ReplayAccess::Denied(DenialReason::MissingPlaybackId));
        }

        let record = match self.store.get(keys::VERIFIED_USER).await? {
            None => None,
            Some(raw) => match MembershipRecord::from_json(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored membership is not a valid record");
                    return Ok(ReplayAccess::Denied(DenialReason::InvalidMembershipData));
                }
            },
        };

        let decision = self.evaluator.evaluate(record.as_ref(), query.now);

        if decision.requires_purge() {
            self.purge().await;
        }

        match (decision, record) {
            (AccessDecision::Granted(grant), Some(record)) => {
                Ok(ReplayAccess::Granted(ReplayView {
                    playback_id: playback_id.to_string(),
                    title: REPLAY_TITLE.to_string(),
                    viewer_id: record.token().unwrap_or_default().to_string(),
                    plan_label: grant.plan_label,
                    remaining: grant.remaining,
                    expires_at: grant.expires_at,
                    email: record.email_or_placeholder().to_string(),
                }))
            }
            (AccessDecision::Granted(_), None) => {
                Ok(ReplayAccess::Denied(DenialReason::NoMembership))
            }
            (AccessDecision::Denied(reason), _) => Ok(ReplayAccess::Denied(reason)),
        }
    }

    /// Delete the lapsed membership and its auth token. Failures are logged
    /// and do not change the outcome.
    async fn purge(&self) {
        for key in [keys::VERIFIED_USER, keys::AUTH_TOKEN] {
            if let Err(e) = self.store.remove(key).await {
                tracing::warn!(key, error = %e, "Failed to purge expired membership");
            }
        }
        tracing::info!("Expired membership purged");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryLocalStore;
    use async_trait::async_trait;
    use serde_json::json;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct FailingStore {
        fail_get: bool,
        inner: InMemoryLocalStore,
    }

    #[async_trait]
    impl LocalStore for FailingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_get {
                return Err(StoreError::IoError("Simulated read failure".into()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::IoError("Simulated delete failure".into()))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn ts(raw: &str) -> Timestamp {
        Timestamp::parse_lenient(raw).unwrap()
    }

    fn store_with(record: serde_json::Value) -> Arc<InMemoryLocalStore> {
        Arc::new(InMemoryLocalStore::with_entries([
            (keys::VERIFIED_USER, record.to_string()),
            (keys::AUTH_TOKEN, "tok-123".to_string()),
        ]))
    }

    fn monthly_record() -> serde_json::Value {
        json!({
            "token": "tok-123",
            "membershipType": "bulanan",
            "registered_date": "2024-01-01",
            "email": "fan@example.com"
        })
    }

    fn query(playback_id: &str, now: &str) -> CheckReplayAccessQuery {
        CheckReplayAccessQuery {
            playback_id: playback_id.to_string(),
            now: ts(now),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn grants_view_for_active_monthly_membership() {
        let handler = CheckReplayAccessHandler::new(store_with(monthly_record()));

        let access = handler
            .handle(query("pb-001", "2024-01-31T00:00:00Z"))
            .await
            .unwrap();

        let ReplayAccess::Granted(view) = access else {
            panic!("expected grant, got {:?}", access);
        };
        assert_eq!(view.playback_id, "pb-001");
        assert_eq!(view.title, REPLAY_TITLE);
        assert_eq!(view.viewer_id, "tok-123");
        assert_eq!(view.plan_label, "💎 Bulanan");
        assert_eq!(view.remaining, RemainingValidity::Days(1));
        assert_eq!(view.email, "fan@example.com");
    }

    #[tokio::test]
    async fn grant_uses_placeholder_email() {
        let mut record = monthly_record();
        record.as_object_mut().unwrap().remove("email");
        let handler = CheckReplayAccessHandler::new(store_with(record));

        let access = handler
            .handle(query("pb-001", "2024-01-10T00:00:00Z"))
            .await
            .unwrap();

        let ReplayAccess::Granted(view) = access else {
            panic!("expected grant");
        };
        assert_eq!(view.email, "user@jkt48connect.com");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Denial Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn blank_playback_id_is_denied_without_reading_store() {
        let store = Arc::new(FailingStore {
            fail_get: true,
            inner: InMemoryLocalStore::new(),
        });
        let handler = CheckReplayAccessHandler::new(store);

        let access = handler.handle(query("  ", "2024-01-10")).await.unwrap();

        assert_eq!(access, ReplayAccess::Denied(DenialReason::MissingPlaybackId));
    }

    #[tokio::test]
    async fn missing_record_is_no_membership() {
        let handler = CheckReplayAccessHandler::new(Arc::new(InMemoryLocalStore::new()));

        let access = handler.handle(query("pb", "2024-01-10")).await.unwrap();

        assert_eq!(access, ReplayAccess::Denied(DenialReason::NoMembership));
    }

    #[tokio::test]
    async fn malformed_record_is_invalid_data() {
        let store = Arc::new(InMemoryLocalStore::with_entries([(
            keys::VERIFIED_USER,
            "{not json",
        )]));
        let handler = CheckReplayAccessHandler::new(store.clone());

        let access = handler.handle(query("pb", "2024-01-10")).await.unwrap();

        assert_eq!(access, ReplayAccess::Denied(DenialReason::InvalidMembershipData));
        assert!(store.contains(keys::VERIFIED_USER).await);
    }

    #[tokio::test]
    async fn expired_membership_is_purged() {
        let store = store_with(monthly_record());
        let handler = CheckReplayAccessHandler::new(store.clone());

        let access = handler
            .handle(query("pb", "2024-02-02T00:00:00Z"))
            .await
            .unwrap();

        assert_eq!(access, ReplayAccess::Denied(DenialReason::Expired));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn ineligible_plan_is_not_purged() {
        let store = store_with(json!({
            "token": "tok",
            "membershipType": "weekly",
            "registered_date": "2020-01-01"
        }));
        let handler = CheckReplayAccessHandler::new(store.clone());

        let access = handler.handle(query("pb", "2024-01-10")).await.unwrap();

        assert_eq!(access, ReplayAccess::Denied(DenialReason::PlanNotEligible));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn failed_purge_still_denies() {
        let inner = InMemoryLocalStore::with_entries([(
            keys::VERIFIED_USER,
            monthly_record().to_string(),
        )]);
        let handler = CheckReplayAccessHandler::new(Arc::new(FailingStore {
            fail_get: false,
            inner,
        }));

        let access = handler
            .handle(query("pb", "2024-03-01T00:00:00Z"))
            .await
            .unwrap();

        assert_eq!(access, ReplayAccess::Denied(DenialReason::Expired));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn store_read_failure_is_transient_error() {
        let handler = CheckReplayAccessHandler::new(Arc::new(FailingStore {
            fail_get: true,
            inner: InMemoryLocalStore::new(),
        }));

        let err = handler.handle(query("pb", "2024-01-10")).await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "Terjadi kesalahan saat memeriksa akses. Silakan coba lagi."
        );
    }
}
