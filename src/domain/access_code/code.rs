//! Access code entity as reflected from the code service.
//!
//! The service owns these records; nothing here enforces invariants on
//! them beyond what is needed to display, filter and search.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Category of an access code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CodeType {
    #[default]
    Custom,
    Show,
    Membership,
    Special,
    /// Any category the console does not know about, kept verbatim.
    Other(String),
}

impl CodeType {
    pub fn as_str(&self) -> &str {
        match self {
            CodeType::Custom => "custom",
            CodeType::Show => "show",
            CodeType::Membership => "membership",
            CodeType::Special => "special",
            CodeType::Other(raw) => raw,
        }
    }
}

impl From<&str> for CodeType {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "custom" => CodeType::Custom,
            "show" => CodeType::Show,
            "membership" => CodeType::Membership,
            "special" => CodeType::Special,
            _ => CodeType::Other(raw.to_string()),
        }
    }
}

impl std::fmt::Display for CodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Character set the service draws generated codes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeFormat {
    #[default]
    Alphanumeric,
    Numeric,
    Alpha,
}

impl CodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFormat::Alphanumeric => "alphanumeric",
            CodeFormat::Numeric => "numeric",
            CodeFormat::Alpha => "alpha",
        }
    }
}

impl FromStr for CodeFormat {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_lowercase().as_str() {
            "alphanumeric" => Ok(CodeFormat::Alphanumeric),
            "numeric" => Ok(CodeFormat::Numeric),
            "alpha" => Ok(CodeFormat::Alpha),
            other => Err(ValidationError::invalid_format(
                "code_format",
                format!("unknown format '{}'", other),
            )),
        }
    }
}

impl std::fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An access code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccessCode {
    pub code: String,
    pub email: String,
    pub code_type: CodeType,
    pub purpose: String,
    pub usage_count: u32,
    pub usage_limit: u32,
    pub is_active: bool,
    pub is_used: bool,
    pub expires_at: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub last_used_at: Option<Timestamp>,
    pub metadata: Map<String, Value>,
}

/// One entry of a code's usage history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageRecord {
    pub action: String,
    pub status: String,
    pub at: Option<Timestamp>,
    pub ip_address: Option<String>,
    pub error_message: Option<String>,
}

/// Aggregate counters reported alongside the full listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeStatistics {
    pub total_codes: u64,
    pub active_codes: u64,
    pub used_codes: u64,
    pub expired_codes: u64,
}

/// Everything the list endpoint returns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeCatalog {
    pub statistics: CodeStatistics,
    pub codes: Vec<AccessCode>,
}

/// A single code with its usage history, as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeDetail {
    pub code: AccessCode,
    pub usage_history: Vec<UsageRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_types_parse_case_insensitively() {
        assert_eq!(CodeType::from("SHOW"), CodeType::Show);
        assert_eq!(CodeType::from("membership"), CodeType::Membership);
    }

    #[test]
    fn unknown_code_type_is_preserved() {
        let code_type = CodeType::from("Birthday");
        assert_eq!(code_type, CodeType::Other("Birthday".to_string()));
        assert_eq!(code_type.as_str(), "Birthday");
    }

    #[test]
    fn code_format_rejects_unknown_values() {
        assert_eq!("numeric".parse::<CodeFormat>(), Ok(CodeFormat::Numeric));
        assert!("hex".parse::<CodeFormat>().is_err());
    }
}
