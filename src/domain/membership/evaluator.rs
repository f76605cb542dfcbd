//! Replay access policy.
//!
//! A pure function of `(record, now)`. Checks run in a fixed order and the
//! first failing one decides the outcome:
//!
//! 1. a record is stored
//! 2. it carries a token
//! 3. it names a plan
//! 4. the plan (after synonym resolution) is monthly
//! 5. a registration date parses
//! 6. `now` has not passed registration + plan duration
//!
//! Removing an expired record is left to the caller, signalled through
//! [`AccessDecision::requires_purge`].

use super::{
    display_label, AccessDecision, AccessGrant, DenialReason, MembershipRecord, PlanType,
    RemainingValidity,
};
use crate::domain::foundation::Timestamp;

/// Evaluates stored memberships against the replay access policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicyEvaluator;

impl AccessPolicyEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Decides whether `record` may watch replays at instant `now`.
    pub fn evaluate(&self, record: Option<&MembershipRecord>, now: Timestamp) -> AccessDecision {
        let Some(record) = record else {
            return AccessDecision::Denied(DenialReason::NoMembership);
        };

        if record.token().is_none() {
            return AccessDecision::Denied(DenialReason::MissingToken);
        }

        let Some(raw_plan) = record.raw_plan_type() else {
            return AccessDecision::Denied(DenialReason::MissingPlanType);
        };

        let plan = PlanType::resolve(raw_plan);
        if !plan.is_replay_eligible() {
            return AccessDecision::Denied(DenialReason::PlanNotEligible);
        }

        let Some(expires_at) = record
            .registered_at()
            .and_then(|registered_at| plan.expiry_from(registered_at))
        else {
            return AccessDecision::Denied(DenialReason::MissingRegistrationDate);
        };

        if now.is_after(&expires_at) {
            tracing::debug!(
                plan = %plan,
                expires_at = %expires_at,
                now = %now,
                "Membership expired"
            );
            return AccessDecision::Denied(DenialReason::Expired);
        }

        AccessDecision::Granted(AccessGrant {
            plan,
            plan_label: display_label(Some(raw_plan)),
            expires_at,
            remaining: RemainingValidity::from_days(expires_at.days_after_ceil(&now)),
        })
    }
}
