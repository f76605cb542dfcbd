//! File-based Local Store Adapter
//!
//! Stores each key as `<key>.json` inside a base directory so state
//! survives between CLI invocations.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{LocalStore, StoreError};

/// File-based keyed store
#[derive(Debug, Clone)]
pub struct FileLocalStore {
    base_path: PathBuf,
}

impl FileLocalStore {
    /// Create a store rooted at `base_path`. The directory is created on
    /// first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Keys map straight to file names, so only a safe alphabet is allowed.
    fn file_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.file_path(key)?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        fs::write(&path, value)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.file_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn set_and_get_round_trip_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(temp_dir.path());

        store
            .set("jkt48_verified_user", r#"{"token":"abc"}"#)
            .await
            .unwrap();

        let value = store.get("jkt48_verified_user").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"token":"abc"}"#));
        assert!(temp_dir.path().join("jkt48_verified_user.json").exists());
    }

    #[tokio::test]
    async fn set_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("state").join("nested");
        let store = FileLocalStore::new(&nested);

        store.set("userLogin", "{}").await.unwrap();

        assert!(nested.join("userLogin.json").exists());
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(temp_dir.path());

        assert!(store.get("jkt48_auth_token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_deletes_file_and_tolerates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(temp_dir.path());

        store.set("jkt48_auth_token", "\"t\"").await.unwrap();
        store.remove("jkt48_auth_token").await.unwrap();
        store.remove("jkt48_auth_token").await.unwrap();

        assert!(store.get("jkt48_auth_token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_path_traversal_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(temp_dir.path());

        for key in ["../escape", "a/b", "", "dot.key"] {
            let result = store.set(key, "x").await;
            assert!(matches!(result, Err(StoreError::InvalidKey(_))), "{key}");
        }
    }
}
