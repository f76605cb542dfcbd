//! Membership plan definitions.
//!
//! Plans arrive as free-form strings from the verification flow, in English
//! or Indonesian. This module is the single place they are normalized.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Membership plan.
///
/// Determines how long a membership stays valid after registration and
/// whether it unlocks replay content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Seven days from registration.
    Weekly,

    /// One calendar month from registration. The only plan with replay access.
    Monthly,

    /// One calendar year from registration.
    Yearly,
}

impl PlanType {
    /// All plans, in ascending duration.
    pub const ALL: [PlanType; 3] = [PlanType::Weekly, PlanType::Monthly, PlanType::Yearly];

    /// Matches a raw plan string against the canonical names and their
    /// Indonesian synonyms, ignoring case.
    pub fn recognize(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "weekly" | "mingguan" => Some(PlanType::Weekly),
            "monthly" | "bulanan" => Some(PlanType::Monthly),
            "yearly" | "tahunan" => Some(PlanType::Yearly),
            _ => None,
        }
    }

    /// Resolves a raw plan string, falling back to [`PlanType::Monthly`]
    /// for anything unrecognized.
    ///
    /// The fallback hands unknown plans the replay-eligible plan. Whether
    /// that should instead deny is an open product question.
    pub fn resolve(raw: &str) -> Self {
        Self::recognize(raw).unwrap_or(PlanType::Monthly)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Weekly => "weekly",
            PlanType::Monthly => "monthly",
            PlanType::Yearly => "yearly",
        }
    }

    /// Label shown next to the player.
    pub fn display_label(&self) -> &'static str {
        match self {
            PlanType::Weekly => "⭐ Mingguan",
            PlanType::Monthly => "💎 Bulanan",
            PlanType::Yearly => "👑 Tahunan",
        }
    }

    /// Replay content is reserved for monthly members.
    pub fn is_replay_eligible(&self) -> bool {
        matches!(self, PlanType::Monthly)
    }

    /// Instant at which a membership registered at `registered_at` lapses.
    ///
    /// Returns `None` only when the addition overflows chrono's range.
    pub fn expiry_from(&self, registered_at: Timestamp) -> Option<Timestamp> {
        match self {
            PlanType::Weekly => registered_at.checked_add_days(7),
            PlanType::Monthly => registered_at.checked_add_months(1),
            PlanType::Yearly => registered_at.checked_add_years(1),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display label for a raw plan string.
///
/// Recognized plans get their localized label, unrecognized values are
/// echoed back as-is, and an absent value is labelled as monthly.
pub fn display_label(raw: Option<&str>) -> String {
    match raw {
        None => PlanType::Monthly.display_label().to_string(),
        Some(value) if value.is_empty() => PlanType::Monthly.display_label().to_string(),
        Some(value) => match PlanType::recognize(value) {
            Some(plan) => plan.display_label().to_string(),
            None => value.to_string(),
        },
    }
}
