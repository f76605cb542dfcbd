//! AdminSession - Login marker management for the admin console.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::ports::{keys, LocalStore, StoreError};

/// Stored login marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LoginMarker {
    #[serde(rename = "isLoggedIn", default)]
    is_logged_in: bool,

    #[serde(rename = "loggedInAt", default, skip_serializing_if = "Option::is_none")]
    logged_in_at: Option<Value>,
}

/// Errors from the admin session gate.
#[derive(Debug, thiserror::Error)]
pub enum AdminSessionError {
    #[error("Admin is not logged in")]
    NotLoggedIn,

    #[error("Failed to access admin session: {0}")]
    Store(#[from] StoreError),
}

impl AdminSessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AdminSessionError::NotLoggedIn => "Silakan login terlebih dahulu",
            AdminSessionError::Store(_) => "Terjadi kesalahan saat memeriksa sesi login",
        }
    }
}

/// Reads and writes the admin login marker.
#[derive(Clone)]
pub struct AdminSession {
    store: Arc<dyn LocalStore>,
}

impl AdminSession {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Store the login marker.
    pub async fn start(&self, now: Timestamp) -> Result<(), AdminSessionError> {
        let marker = LoginMarker {
            is_logged_in: true,
            logged_in_at: Some(Value::String(now.to_rfc3339())),
        };
        let json = serde_json::to_string(&marker)
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        self.store.set(keys::ADMIN_LOGIN, &json).await?;
        tracing::info!("Admin session started");
        Ok(())
    }

    /// Remove the login marker.
    pub async fn end(&self) -> Result<(), AdminSessionError> {
        self.store.remove(keys::ADMIN_LOGIN).await?;
        tracing::info!("Admin session ended");
        Ok(())
    }

    /// True if a marker with `isLoggedIn: true` is stored. An unreadable
    /// marker counts as logged out.
    pub async fn is_logged_in(&self) -> Result<bool, AdminSessionError> {
        let Some(raw) = self.store.get(keys::ADMIN_LOGIN).await? else {
            return Ok(false);
        };

        match serde_json::from_str::<Option<LoginMarker>>(&raw) {
            Ok(marker) => Ok(marker.map_or(false, |m| m.is_logged_in)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable admin login marker");
                Ok(false)
            }
        }
    }

    /// Fails with `NotLoggedIn` unless a session is active.
    pub async fn require(&self) -> Result<(), AdminSessionError> {
        if self.is_logged_in().await? {
            Ok(())
        } else {
            Err(AdminSessionError::NotLoggedIn)
        }
    }
}
