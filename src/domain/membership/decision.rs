//! Replay access decision types.

use serde::{Deserialize, Serialize};

use super::PlanType;
use crate::domain::foundation::Timestamp;

/// Outcome of a single replay access check.
///
/// Every branch of the policy ends in one of these values; denial is
/// ordinary data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Replay may be shown.
    Granted(AccessGrant),
    /// Replay must not be shown.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Returns true if access is granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted(_))
    }

    /// Returns the denial reason, if denied.
    pub fn denial(&self) -> Option<&DenialReason> {
        match self {
            AccessDecision::Denied(reason) => Some(reason),
            AccessDecision::Granted(_) => None,
        }
    }

    /// True when the caller must delete the stored membership.
    pub fn requires_purge(&self) -> bool {
        matches!(self, AccessDecision::Denied(DenialReason::Expired))
    }
}

/// Display-ready details of a granted check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// Canonical plan after synonym resolution.
    pub plan: PlanType,
    /// Localized plan label (or the raw value when unrecognized).
    pub plan_label: String,
    /// Instant the membership lapses.
    pub expires_at: Timestamp,
    /// Time left, rounded up to whole days.
    pub remaining: RemainingValidity,
}

/// Remaining validity, rounded up to whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingValidity {
    /// At least one (possibly partial) day remains.
    Days(u32),
    /// The rounded figure came out non-positive.
    Lapsed,
}

impl RemainingValidity {
    /// Maps a ceiling day count to a validity value.
    pub fn from_days(days: i64) -> Self {
        if days <= 0 {
            RemainingValidity::Lapsed
        } else {
            RemainingValidity::Days(u32::try_from(days).unwrap_or(u32::MAX))
        }
    }

    /// Day count, if any remain.
    pub fn days(&self) -> Option<u32> {
        match self {
            RemainingValidity::Days(days) => Some(*days),
            RemainingValidity::Lapsed => None,
        }
    }
}

impl std::fmt::Display for RemainingValidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemainingValidity::Days(days) => write!(f, "{} hari lagi", days),
            RemainingValidity::Lapsed => write!(f, "Sudah Expired"),
        }
    }
}

/// Why replay access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The request did not name a replay.
    MissingPlaybackId,
    /// No membership is stored.
    NoMembership,
    /// A membership is stored but is not a readable record.
    InvalidMembershipData,
    /// The record has no credential.
    MissingToken,
    /// The record has no plan type at all.
    MissingPlanType,
    /// The plan does not include replay.
    PlanNotEligible,
    /// No registration date could be parsed.
    MissingRegistrationDate,
    /// The membership has lapsed.
    Expired,
}

impl DenialReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            DenialReason::MissingPlaybackId => "missing_playback_id",
            DenialReason::NoMembership => "no_membership",
            DenialReason::InvalidMembershipData => "invalid_membership_data",
            DenialReason::MissingToken => "missing_token",
            DenialReason::MissingPlanType => "missing_plan_type",
            DenialReason::PlanNotEligible => "plan_not_eligible",
            DenialReason::MissingRegistrationDate => "missing_registration_date",
            DenialReason::Expired => "expired",
        }
    }

    /// Message shown on the locked replay screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            DenialReason::MissingPlaybackId => "Playback ID tidak ditemukan",
            DenialReason::NoMembership => {
                "Anda belum memiliki membership aktif. Silakan verifikasi terlebih dahulu."
            }
            DenialReason::InvalidMembershipData => "Data membership tidak valid",
            DenialReason::MissingToken => "Token tidak ditemukan. Silakan verifikasi ulang.",
            DenialReason::MissingPlanType => "Tipe membership tidak ditemukan.",
            DenialReason::PlanNotEligible => {
                "Akses Replay hanya tersedia untuk membership Bulanan. Silakan upgrade membership Anda."
            }
            DenialReason::MissingRegistrationDate => "Data registrasi tidak ditemukan.",
            DenialReason::Expired => {
                "Membership Anda telah berakhir. Silakan perpanjang membership."
            }
        }
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
