//! In-memory code registry.
//!
//! A working stand-in for the wotatokens service, used by handler and
//! console tests. Supports:
//! - Seeded codes and deterministic code generation
//! - Ownership checks on `(code, email)`
//! - Error injection per operation
//! - Call tracking

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::access_code::{
    AccessCode, CodeCatalog, CodeDetail, CodeFormat, CodeStatistics, NewCode, UsageRecord,
};
use crate::domain::foundation::Timestamp;
use crate::ports::{CodeRegistry, RegistryError};

/// In-memory `CodeRegistry`.
///
/// # Example
///
/// ```ignore
/// let registry = InMemoryCodeRegistry::new();
/// registry.insert(code);
/// registry.fail_next("list", RegistryError::network("down"));
///
/// let catalog = registry.list().await;
/// assert_eq!(registry.calls_to("list"), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryCodeRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

#[derive(Default)]
struct RegistryState {
    codes: Vec<AccessCode>,
    history: Vec<(String, UsageRecord)>,
    next_serial: u64,
    failures: Vec<(&'static str, RegistryError)>,
    call_log: Vec<RegistryCall>,
}

/// Recorded call for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryCall {
    pub operation: &'static str,
    pub code: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<Map<String, Value>>,
}

impl RegistryCall {
    fn new(operation: &'static str) -> Self {
        Self {
            operation,
            code: None,
            email: None,
            is_active: None,
            metadata: None,
        }
    }
}

impl InMemoryCodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `codes`.
    pub fn with_codes(codes: impl IntoIterator<Item = AccessCode>) -> Self {
        let registry = Self::new();
        registry.state().codes.extend(codes);
        registry
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add a code to the registry.
    pub fn insert(&self, code: AccessCode) {
        self.state().codes.push(code);
    }

    /// Append a usage entry to a code's history.
    pub fn record_usage(&self, code: &str, entry: UsageRecord) {
        self.state().history.push((code.to_string(), entry));
    }

    /// Make the next call to `operation` fail with `error`.
    ///
    /// Operations: `create`, `list`, `detail`, `update`, `delete`.
    pub fn fail_next(&self, operation: &'static str, error: RegistryError) {
        self.state().failures.push((operation, error));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Current codes, in insertion order.
    pub fn codes(&self) -> Vec<AccessCode> {
        self.state().codes.clone()
    }

    /// Look up a code by its value.
    pub fn find(&self, code: &str) -> Option<AccessCode> {
        self.state().codes.iter().find(|c| c.code == code).cloned()
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.state().call_log.clone()
    }

    /// Number of calls made to `operation`.
    pub fn calls_to(&self, operation: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    /// Whether any call was made at all.
    pub fn was_called(&self) -> bool {
        !self.state().call_log.is_empty()
    }
}

impl RegistryState {
    fn begin(&mut self, call: RegistryCall) -> Result<(), RegistryError> {
        let operation = call.operation;
        self.call_log.push(call);

        match self.failures.iter().position(|(op, _)| *op == operation) {
            Some(index) => Err(self.failures.remove(index).1),
            None => Ok(()),
        }
    }

    fn owned_mut(&mut self, code: &str, email: &str) -> Result<&mut AccessCode, RegistryError> {
        self.codes
            .iter_mut()
            .find(|c| c.code == code && c.email == email)
            .ok_or_else(|| RegistryError::rejected(Some("Code not found".to_string())))
    }

    fn generate(&mut self, format: CodeFormat, length: u32) -> String {
        self.next_serial += 1;
        let alphabet: &[u8] = match format {
            CodeFormat::Alphanumeric => b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CodeFormat::Numeric => b"0123456789",
            CodeFormat::Alpha => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        };
        let base = alphabet.len() as u64;

        let mut n = self.next_serial;
        let mut chars = vec![alphabet[0]; length as usize];
        for slot in chars.iter_mut().rev() {
            *slot = alphabet[(n % base) as usize];
            n /= base;
        }
        String::from_utf8_lossy(&chars).into_owned()
    }

    fn statistics(&self, now: Timestamp) -> CodeStatistics {
        let count = |f: &dyn Fn(&AccessCode) -> bool| self.codes.iter().filter(|c| f(c)).count() as u64;
        CodeStatistics {
            total_codes: self.codes.len() as u64,
            active_codes: count(&|c| c.is_active),
            used_codes: count(&|c| c.is_used),
            expired_codes: count(&|c| c.expires_at.map_or(false, |at| now.is_after(&at))),
        }
    }
}

#[async_trait]
impl CodeRegistry for InMemoryCodeRegistry {
    async fn create(&self, request: &NewCode) -> Result<AccessCode, RegistryError> {
        let mut state = self.state();
        state.begin(RegistryCall {
            email: Some(request.email.clone()),
            metadata: Some(request.metadata.clone()),
            ..RegistryCall::new("create")
        })?;

        let now = Timestamp::now();
        let code = AccessCode {
            code: state.generate(request.code_format, request.code_length),
            email: request.email.clone(),
            code_type: request.code_type.clone(),
            purpose: request.purpose.clone(),
            usage_count: 0,
            usage_limit: request.usage_limit,
            is_active: true,
            is_used: false,
            expires_at: now.checked_add_hours(i64::from(request.expires_in_hours)),
            created_at: Some(now),
            updated_at: Some(now),
            last_used_at: None,
            metadata: request.metadata.clone(),
        };
        state.codes.push(code.clone());

        Ok(code)
    }

    async fn list(&self) -> Result<CodeCatalog, RegistryError> {
        let mut state = self.state();
        state.begin(RegistryCall::new("list"))?;

        Ok(CodeCatalog {
            statistics: state.statistics(Timestamp::now()),
            codes: state.codes.clone(),
        })
    }

    async fn detail(&self, code: &str, email: &str) -> Result<CodeDetail, RegistryError> {
        let mut state = self.state();
        state.begin(RegistryCall {
            code: Some(code.to_string()),
            email: Some(email.to_string()),
            ..RegistryCall::new("detail")
        })?;

        let found = state
            .codes
            .iter()
            .find(|c| c.code == code && c.email == email)
            .cloned()
            .ok_or_else(|| RegistryError::rejected(None))?;
        let usage_history = state
            .history
            .iter()
            .filter(|(owner, _)| owner == code)
            .map(|(_, entry)| entry.clone())
            .collect();

        Ok(CodeDetail {
            code: found,
            usage_history,
        })
    }

    async fn set_active(
        &self,
        code: &str,
        email: &str,
        is_active: bool,
        metadata: Option<&Map<String, Value>>,
    ) -> Result<(), RegistryError> {
        let mut state = self.state();
        state.begin(RegistryCall {
            code: Some(code.to_string()),
            email: Some(email.to_string()),
            is_active: Some(is_active),
            metadata: metadata.cloned(),
            ..RegistryCall::new("update")
        })?;

        let target = state.owned_mut(code, email)?;
        target.is_active = is_active;
        if let Some(metadata) = metadata {
            target.metadata = metadata.clone();
        }
        target.updated_at = Some(Timestamp::now());
        Ok(())
    }

    async fn delete(&self, code: &str, email: &str) -> Result<(), RegistryError> {
        let mut state = self.state();
        state.begin(RegistryCall {
            code: Some(code.to_string()),
            email: Some(email.to_string()),
            ..RegistryCall::new("delete")
        })?;

        state.owned_mut(code, email)?;
        state.codes.retain(|c| !(c.code == code && c.email == email));
        state.history.retain(|(owner, _)| owner != code);
        Ok(())
    }
}
