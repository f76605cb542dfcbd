//! Code registry port.
//!
//! Contract for the remote service that owns access codes. Every operation
//! is a single attempt: implementations must not retry or cache.
//!
//! The service treats the owner email as proof of ownership, so every
//! per-code operation takes the `(code, email)` pair.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::access_code::{AccessCode, CodeCatalog, CodeDetail, NewCode};

/// Port for managing access codes on the code service.
#[async_trait]
pub trait CodeRegistry: Send + Sync {
    /// Create a new code. Returns the code as stored by the service.
    async fn create(&self, request: &NewCode) -> Result<AccessCode, RegistryError>;

    /// Fetch every code together with aggregate statistics.
    async fn list(&self) -> Result<CodeCatalog, RegistryError>;

    /// Fetch one code and its usage history.
    ///
    /// The service answers with a rejection when the code does not exist or
    /// is not owned by `email`.
    async fn detail(&self, code: &str, email: &str) -> Result<CodeDetail, RegistryError>;

    /// Set the active flag of a code. `metadata`, when given, is sent along.
    async fn set_active(
        &self,
        code: &str,
        email: &str,
        is_active: bool,
        metadata: Option<&Map<String, Value>>,
    ) -> Result<(), RegistryError>;

    /// Delete a code.
    async fn delete(&self, code: &str, email: &str) -> Result<(), RegistryError>;
}

/// Errors returned by code registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The service answered but refused the request (`status: false`).
    #[error("Request rejected by code service{}", message_suffix(.message))]
    Rejected { message: Option<String> },

    /// The service answered with a non-success HTTP status.
    #[error("Code service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never completed.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be understood.
    #[error("Failed to decode code service response: {0}")]
    Decode(String),
}

impl RegistryError {
    pub fn rejected(message: Option<String>) -> Self {
        RegistryError::Rejected { message }
    }

    pub fn network(message: impl Into<String>) -> Self {
        RegistryError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        RegistryError::Decode(message.into())
    }

    /// True when the service itself refused the request, as opposed to a
    /// transport or decoding failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RegistryError::Rejected { .. })
    }
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}
