//! Client-side filtering and search over a code listing.

use std::str::FromStr;

use super::AccessCode;
use crate::domain::foundation::ValidationError;

/// Status filter offered by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeFilter {
    #[default]
    All,
    Active,
    Inactive,
    Used,
    Unused,
}

impl CodeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFilter::All => "all",
            CodeFilter::Active => "active",
            CodeFilter::Inactive => "inactive",
            CodeFilter::Used => "used",
            CodeFilter::Unused => "unused",
        }
    }

    /// Returns true if the code passes this filter.
    pub fn matches(&self, code: &AccessCode) -> bool {
        match self {
            CodeFilter::All => true,
            CodeFilter::Active => code.is_active,
            CodeFilter::Inactive => !code.is_active,
            CodeFilter::Used => code.is_used,
            CodeFilter::Unused => !code.is_used,
        }
    }
}

impl FromStr for CodeFilter {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_lowercase().as_str() {
            "all" => Ok(CodeFilter::All),
            "active" => Ok(CodeFilter::Active),
            "inactive" => Ok(CodeFilter::Inactive),
            "used" => Ok(CodeFilter::Used),
            "unused" => Ok(CodeFilter::Unused),
            other => Err(ValidationError::invalid_format(
                "filter",
                format!("unknown filter '{}'", other),
            )),
        }
    }
}

impl std::fmt::Display for CodeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns true if `query` appears, ignoring case, in the code, the owner
/// email or the purpose. A blank query matches everything.
pub fn matches_search(code: &AccessCode, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [&code.code, &code.email, &code.purpose]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Applies the status filter, then the free-text search. Order is preserved.
pub fn select(codes: Vec<AccessCode>, filter: CodeFilter, query: &str) -> Vec<AccessCode> {
    codes
        .into_iter()
        .filter(|code| filter.matches(code))
        .filter(|code| matches_search(code, query))
        .collect()
}
