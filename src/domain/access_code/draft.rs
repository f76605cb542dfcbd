//! Code creation input and its validation.

use std::ops::RangeInclusive;

use serde_json::{Map, Value};

use super::{CodeFormat, CodeType};
use crate::domain::foundation::{Timestamp, ValidationError};

/// Allowed length of a generated code.
pub const CODE_LENGTH_RANGE: RangeInclusive<u32> = 6..=20;

/// Allowed number of redemptions per code.
pub const USAGE_LIMIT_RANGE: RangeInclusive<u32> = 1..=9999;

/// Allowed lifetime of a code, in hours (one year at most).
pub const EXPIRES_IN_HOURS_RANGE: RangeInclusive<u32> = 1..=8760;

/// Operator input for a new code, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDraft {
    pub email: String,
    pub purpose: String,
    pub code_type: CodeType,
    pub code_length: u32,
    pub code_format: CodeFormat,
    pub usage_limit: u32,
    pub expires_in_hours: u32,
    /// When false, the code is deactivated right after creation.
    pub is_active: bool,
    pub created_by: String,
    pub notes: String,
}

impl Default for CodeDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            purpose: String::new(),
            code_type: CodeType::Custom,
            code_length: 8,
            code_format: CodeFormat::Alphanumeric,
            usage_limit: 1,
            expires_in_hours: 168,
            is_active: true,
            created_by: "admin".to_string(),
            notes: String::new(),
        }
    }
}

impl CodeDraft {
    /// Creates a draft with default settings for the given owner and purpose.
    pub fn new(email: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            purpose: purpose.into(),
            ..Default::default()
        }
    }

    /// Validates the draft and stamps its metadata with `now`.
    ///
    /// Email and purpose are trimmed. The first failing check is returned.
    pub fn validate(self, now: Timestamp) -> Result<NewCode, ValidationError> {
        let email = self.email.trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let purpose = self.purpose.trim().to_string();
        if purpose.is_empty() {
            return Err(ValidationError::empty_field("purpose"));
        }

        check_range("code_length", self.code_length, &CODE_LENGTH_RANGE)?;
        check_range("usage_limit", self.usage_limit, &USAGE_LIMIT_RANGE)?;
        check_range(
            "expires_in_hours",
            self.expires_in_hours,
            &EXPIRES_IN_HOURS_RANGE,
        )?;

        let mut metadata = Map::new();
        metadata.insert("created_by".to_string(), Value::String(self.created_by));
        metadata.insert("notes".to_string(), Value::String(self.notes));
        metadata.insert("created_at".to_string(), Value::String(now.to_rfc3339()));

        Ok(NewCode {
            email,
            purpose,
            code_type: self.code_type,
            code_length: self.code_length,
            code_format: self.code_format,
            usage_limit: self.usage_limit,
            expires_in_hours: self.expires_in_hours,
            activate: self.is_active,
            metadata,
        })
    }
}

fn check_range(
    field: &str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(
            field,
            i64::from(*range.start()),
            i64::from(*range.end()),
            i64::from(value),
        ))
    }
}

/// A validated creation request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCode {
    pub email: String,
    pub purpose: String,
    pub code_type: CodeType,
    pub code_length: u32,
    pub code_format: CodeFormat,
    pub usage_limit: u32,
    pub expires_in_hours: u32,
    pub activate: bool,
    pub metadata: Map<String, Value>,
}
