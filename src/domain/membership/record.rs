//! Stored membership record.
//!
//! The record is written by an external verification flow and read back
//! from client-side storage as untrusted JSON. Field names are not
//! consistent across writers, so every field is optional here and the
//! accessors below decide which spelling wins. A field holding an
//! unexpected JSON type reads as absent instead of rejecting the record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;

/// Email shown when the record does not carry one.
pub const PLACEHOLDER_EMAIL: &str = "user@jkt48connect.com";

/// Membership record as persisted client-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipRecord {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,

    #[serde(
        default,
        rename = "membershipType",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub membership_type: Option<String>,

    #[serde(
        default,
        rename = "membership_type",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub membership_type_legacy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_date: Option<Value>,

    #[serde(default, rename = "registeredDate", skip_serializing_if = "Option::is_none")]
    pub registered_date_camel: Option<Value>,

    #[serde(
        default,
        rename = "verifiedAt",
        deserialize_with = "lenient_verified_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub verified_at: Option<VerifiedAt>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
}

/// Verification stamp nested inside the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifiedAt {
    #[serde(default, rename = "fullDate", skip_serializing_if = "Option::is_none")]
    pub full_date: Option<Value>,
}

impl MembershipRecord {
    /// Parses a record from the raw stored JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// The credential, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        non_empty(self.token.as_deref())
    }

    /// The raw plan string. `membershipType` wins over `membership_type`;
    /// empty strings count as absent.
    pub fn raw_plan_type(&self) -> Option<&str> {
        non_empty(self.membership_type.as_deref())
            .or_else(|| non_empty(self.membership_type_legacy.as_deref()))
    }

    /// Registration instant.
    ///
    /// Explicit registration fields are tried first, then the nested
    /// verification date. The first candidate that parses wins.
    pub fn registered_at(&self) -> Option<Timestamp> {
        let nested = self
            .verified_at
            .as_ref()
            .and_then(|v| v.full_date.as_ref());

        [
            self.registered_date.as_ref(),
            self.registered_date_camel.as_ref(),
            nested,
        ]
        .into_iter()
        .flatten()
        .find_map(Timestamp::from_json)
    }

    /// Email to display, falling back to [`PLACEHOLDER_EMAIL`].
    pub fn email_or_placeholder(&self) -> &str {
        non_empty(self.email.as_deref()).unwrap_or(PLACEHOLDER_EMAIL)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Strings as given, numbers in their decimal form, anything else absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// The verification stamp only when it is an object.
fn lenient_verified_at<'de, D>(deserializer: D) -> Result<Option<VerifiedAt>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(VerifiedAt {
            full_date: map.get("fullDate").cloned(),
        }),
        _ => None,
    })
}
