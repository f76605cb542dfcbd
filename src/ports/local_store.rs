//! Local Store Port - Interface for client-side keyed storage.
//!
//! Values are opaque JSON strings; interpreting them is the caller's job.
//! Stands in for the browser storage the replay viewer and admin console
//! read their session state from.

use async_trait::async_trait;

/// Well-known keys.
pub mod keys {
    /// Membership record written by the verification flow.
    pub const VERIFIED_USER: &str = "jkt48_verified_user";

    /// Auth token stored next to the membership record.
    pub const AUTH_TOKEN: &str = "jkt48_auth_token";

    /// Admin login session marker.
    pub const ADMIN_LOGIN: &str = "userLogin";
}

/// Errors that can occur during local store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for reading, writing and deleting keyed values.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `None` if nothing is stored under the key
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
