//! Membership domain module.
//!
//! Decides whether a stored membership may watch replays.
//!
//! # Module Structure
//!
//! - `plan` - PlanType and synonym resolution
//! - `record` - MembershipRecord as stored client-side
//! - `decision` - AccessDecision and denial reasons
//! - `evaluator` - AccessPolicyEvaluator, the replay access policy

mod decision;
mod evaluator;
mod plan;
mod record;

pub use decision::{AccessDecision, AccessGrant, DenialReason, RemainingValidity};
pub use evaluator::AccessPolicyEvaluator;
pub use plan::{display_label, PlanType};
pub use record::{MembershipRecord, VerifiedAt, PLACEHOLDER_EMAIL};
