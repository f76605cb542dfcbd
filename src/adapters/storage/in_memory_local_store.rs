//! In-Memory Local Store Adapter
//!
//! Keeps values in a shared map. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{LocalStore, StoreError};

/// In-memory keyed store
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLocalStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Whether a value is stored under `key`
    pub async fn contains(&self, key: &str) -> bool {
        self.values.read().await.contains_key(key)
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let store = InMemoryLocalStore::new();
        store.set("token", "\"abc\"").await.unwrap();

        assert_eq!(store.get("token").await.unwrap().as_deref(), Some("\"abc\""));
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = InMemoryLocalStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let store = InMemoryLocalStore::new();
        store.remove("missing").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryLocalStore::with_entries([("a", "1")]);
        let other = store.clone();

        other.remove("a").await.unwrap();

        assert!(!store.contains("a").await);
    }
}
