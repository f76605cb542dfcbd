//! Wire types for the wotatokens API.
//!
//! Every response is wrapped in `{status, message?, data?}`. Field values
//! are read leniently: counters may arrive as numbers or numeric strings,
//! timestamps in any format `Timestamp::from_json` understands, and
//! `metadata` either as an object or as a JSON-encoded string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::access_code::{
    AccessCode, CodeCatalog, CodeDetail, CodeStatistics, CodeType, NewCode, UsageRecord,
};
use crate::domain::foundation::Timestamp;

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Body of `POST /create`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateCodeBody<'a> {
    pub email: &'a str,
    pub code_type: &'a str,
    pub purpose: &'a str,
    pub code_length: u32,
    pub code_format: &'a str,
    pub usage_limit: u32,
    pub expires_in_hours: u32,
    pub metadata: &'a Map<String, Value>,
}

impl<'a> From<&'a NewCode> for CreateCodeBody<'a> {
    fn from(request: &'a NewCode) -> Self {
        Self {
            email: &request.email,
            code_type: request.code_type.as_str(),
            purpose: &request.purpose,
            code_length: request.code_length,
            code_format: request.code_format.as_str(),
            usage_limit: request.usage_limit,
            expires_in_hours: request.expires_in_hours,
            metadata: &request.metadata,
        }
    }
}

/// Body of `PUT /update/{code}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateCodeBody<'a> {
    pub email: &'a str,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a Map<String, Value>>,
}

/// Body of `DELETE /delete/{code}`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteCodeBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCode {
    pub code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub code_type: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub usage_count: Option<Value>,
    #[serde(default)]
    pub usage_limit: Option<Value>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_used: Option<bool>,
    #[serde(default)]
    pub expires_at: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub updated_at: Option<Value>,
    #[serde(default)]
    pub last_used_at: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl From<WireCode> for AccessCode {
    fn from(wire: WireCode) -> Self {
        Self {
            code: wire.code,
            email: wire.email.unwrap_or_default(),
            code_type: wire
                .code_type
                .as_deref()
                .map(CodeType::from)
                .unwrap_or_default(),
            purpose: wire.purpose.unwrap_or_default(),
            usage_count: small_count(wire.usage_count.as_ref()),
            usage_limit: small_count(wire.usage_limit.as_ref()),
            is_active: wire.is_active.unwrap_or(false),
            is_used: wire.is_used.unwrap_or(false),
            expires_at: timestamp(wire.expires_at.as_ref()),
            created_at: timestamp(wire.created_at.as_ref()),
            updated_at: timestamp(wire.updated_at.as_ref()),
            last_used_at: timestamp(wire.last_used_at.as_ref()),
            metadata: metadata(wire.metadata),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsageRecord {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl From<WireUsageRecord> for UsageRecord {
    fn from(wire: WireUsageRecord) -> Self {
        Self {
            action: wire.action.unwrap_or_default(),
            status: wire.status.unwrap_or_default(),
            at: timestamp(wire.created_at.as_ref()),
            ip_address: wire.ip_address.filter(|ip| !ip.is_empty()),
            error_message: wire.error_message.filter(|m| !m.is_empty()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireStatistics {
    #[serde(default)]
    pub total_codes: Option<Value>,
    #[serde(default)]
    pub active_codes: Option<Value>,
    #[serde(default)]
    pub used_codes: Option<Value>,
    #[serde(default)]
    pub expired_codes: Option<Value>,
}

impl From<WireStatistics> for CodeStatistics {
    fn from(wire: WireStatistics) -> Self {
        Self {
            total_codes: count(wire.total_codes.as_ref()),
            active_codes: count(wire.active_codes.as_ref()),
            used_codes: count(wire.used_codes.as_ref()),
            expired_codes: count(wire.expired_codes.as_ref()),
        }
    }
}

/// `data` of `GET /all`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCatalog {
    #[serde(default)]
    pub statistics: Option<WireStatistics>,
    #[serde(default)]
    pub codes: Vec<WireCode>,
}

impl From<WireCatalog> for CodeCatalog {
    fn from(wire: WireCatalog) -> Self {
        Self {
            statistics: wire.statistics.unwrap_or_default().into(),
            codes: wire.codes.into_iter().map(AccessCode::from).collect(),
        }
    }
}

/// `data` of `GET /detail/{code}`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireDetail {
    pub code: WireCode,
    #[serde(default)]
    pub usage_history: Option<Vec<WireUsageRecord>>,
}

impl From<WireDetail> for CodeDetail {
    fn from(wire: WireDetail) -> Self {
        Self {
            code: wire.code.into(),
            usage_history: wire
                .usage_history
                .unwrap_or_default()
                .into_iter()
                .map(UsageRecord::from)
                .collect(),
        }
    }
}

/// Reads a non-negative counter. Missing or malformed values read as 0.
fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn small_count(value: Option<&Value>) -> u32 {
    u32::try_from(count(value)).unwrap_or(u32::MAX)
}

fn timestamp(value: Option<&Value>) -> Option<Timestamp> {
    value.and_then(Timestamp::from_json)
}

/// Accepts metadata as an object or a JSON-encoded object string.
fn metadata(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        Some(Value::String(raw)) => match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_defaults_missing_fields() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(!envelope.status);
        assert!(envelope.message.is_none());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn code_accepts_string_encoded_metadata() {
        let wire: WireCode = serde_json::from_value(json!({
            "code": "ABCD1234",
            "metadata": "{\"created_by\":\"admin\",\"notes\":\"vip\"}"
        }))
        .unwrap();

        let code = AccessCode::from(wire);
        assert_eq!(code.metadata.get("notes"), Some(&json!("vip")));
    }

    #[test]
    fn code_ignores_unparsable_metadata_string() {
        let wire: WireCode =
            serde_json::from_value(json!({"code": "X", "metadata": "not json"})).unwrap();
        assert!(AccessCode::from(wire).metadata.is_empty());
    }

    #[test]
    fn code_maps_all_fields() {
        let wire: WireCode = serde_json::from_value(json!({
            "code": "SHOW0001",
            "email": "fan@example.com",
            "code_type": "show",
            "purpose": "Theater",
            "usage_count": 2,
            "usage_limit": "5",
            "is_active": true,
            "is_used": false,
            "expires_at": "2024-02-01T00:00:00.000Z",
            "created_at": "2024-01-01 08:30:00",
            "last_used_at": null,
            "metadata": {"created_by": "admin"}
        }))
        .unwrap();

        let code = AccessCode::from(wire);
        assert_eq!(code.code_type, CodeType::Show);
        assert_eq!(code.usage_count, 2);
        assert_eq!(code.usage_limit, 5);
        assert!(code.is_active);
        assert_eq!(
            code.expires_at,
            Timestamp::parse_lenient("2024-02-01T00:00:00Z")
        );
        assert_eq!(
            code.created_at,
            Timestamp::parse_lenient("2024-01-01T08:30:00Z")
        );
        assert!(code.last_used_at.is_none());
        assert!(code.updated_at.is_none());
    }

    #[test]
    fn statistics_read_numeric_strings_and_missing_counters() {
        let wire: WireStatistics = serde_json::from_value(json!({
            "total_codes": "12",
            "active_codes": 7,
            "used_codes": null
        }))
        .unwrap();

        let stats = CodeStatistics::from(wire);
        assert_eq!(stats.total_codes, 12);
        assert_eq!(stats.active_codes, 7);
        assert_eq!(stats.used_codes, 0);
        assert_eq!(stats.expired_codes, 0);
    }

    #[test]
    fn detail_without_history_has_empty_history() {
        let wire: WireDetail =
            serde_json::from_value(json!({"code": {"code": "ABC123"}, "usage_history": null}))
                .unwrap();
        assert!(CodeDetail::from(wire).usage_history.is_empty());
    }

    #[test]
    fn update_body_omits_absent_metadata() {
        let body = UpdateCodeBody {
            email: "a@b.c",
            is_active: false,
            metadata: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"email": "a@b.c", "is_active": false})
        );
    }
}
