//! Collaborator traits for the storage backends, mockable in tests

use super::error::{StorageError, WriteError};
use crate::submission::SubmissionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

/// Identifier assigned by the document store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stores binary files and hands back a retrievable URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing blob, and return its URL
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError>;

    /// Remove the blob stored under `key`; a missing blob is not an error
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Persists records as new documents in named collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(
        &self,
        collection: &str,
        record: &SubmissionRecord,
    ) -> Result<DocumentId, WriteError>;
}

/// Source of submission timestamps
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
