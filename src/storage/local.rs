//! Filesystem backend: blobs and documents under the app data directory

use super::error::{StorageError, WriteError};
use super::traits::{BlobStore, DocumentId, DocumentStore};
use crate::submission::SubmissionRecord;
use async_trait::async_trait;
use reqwest::Url;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Blobs stored as plain files, addressed by `file://` URLs
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Keys are relative paths; anything that could escape `root` is rejected
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        let absolute = tokio::fs::canonicalize(&path).await?;
        let url = Url::from_file_path(&absolute)
            .map_err(|_| StorageError::InvalidKey(absolute.display().to_string()))?;
        Ok(url.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Documents stored as pretty-printed JSON files, one directory per collection
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, WriteError> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(WriteError::InvalidCollection(collection.to_string()));
        }
        Ok(self.root.join(collection))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        record: &SubmissionRecord,
    ) -> Result<DocumentId, WriteError> {
        let dir = self.collection_dir(collection)?;
        tokio::fs::create_dir_all(&dir).await?;

        let id = Uuid::new_v4().to_string();
        let content = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(dir.join(format!("{id}.json")), content).await?;

        Ok(DocumentId::new(id))
    }
}
