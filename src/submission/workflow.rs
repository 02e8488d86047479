//! Submit workflow: optional upload, document write, cleanup on failure
//!
//! The upload and the document write are two independent remote writes. When
//! the write fails after an upload succeeded, the uploaded blob is deleted
//! again so no orphan is left behind.

use super::record::SubmissionRecord;
use crate::config::SignupConfig;
use crate::state::{PendingSubmission, UploadedFile};
use crate::storage::{DocumentId, Services, StorageError, SubmitError};

/// Where a submission is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub collection: String,
    pub upload_prefix: String,
}

impl SubmissionSettings {
    pub fn from_config(config: &SignupConfig) -> Self {
        Self {
            collection: config.collection.clone(),
            upload_prefix: config.upload_prefix.clone(),
        }
    }
}

/// Result of a stored submission
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub document_id: DocumentId,
    pub record: SubmissionRecord,
}

/// Blob key for an uploaded file; same-named files share a key
pub fn blob_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}

struct StoredBlob {
    key: String,
    url: String,
}

async fn upload_file(
    services: &Services,
    settings: &SubmissionSettings,
    file: &UploadedFile,
) -> Result<StoredBlob, SubmitError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| SubmitError::Upload(StorageError::Io(e)))?;
    let key = blob_key(&settings.upload_prefix, &file.name);

    tracing::debug!(key = %key, size = bytes.len(), "uploading file");
    let url = services
        .blobs
        .upload(&key, bytes)
        .await
        .map_err(SubmitError::Upload)?;
    Ok(StoredBlob { key, url })
}

async fn remove_orphan(services: &Services, key: &str) {
    match services.blobs.delete(key).await {
        Ok(()) => tracing::info!(key, "removed upload of failed submission"),
        Err(err) => tracing::warn!(key, error = %err, "could not remove upload of failed submission"),
    }
}

/// Persist one submission; makes a single attempt with no retry
pub async fn submit(
    services: &Services,
    settings: &SubmissionSettings,
    pending: PendingSubmission,
) -> Result<SubmissionReceipt, SubmitError> {
    let stored = match &pending.file {
        Some(file) => Some(upload_file(services, settings, file).await?),
        None => None,
    };

    let record = SubmissionRecord {
        coach_info: pending.coach,
        lifts: pending.lifts,
        uploaded_file_name: pending.file.map(|f| f.name),
        uploaded_file_url: stored.as_ref().map(|s| s.url.clone()),
        submitted_at: services.clock.now(),
    };

    match services.documents.insert(&settings.collection, &record).await {
        Ok(document_id) => {
            tracing::info!(
                collection = %settings.collection,
                document = %document_id,
                "submission stored"
            );
            Ok(SubmissionReceipt {
                document_id,
                record,
            })
        }
        Err(err) => {
            if let Some(blob) = &stored {
                remove_orphan(services, &blob.key).await;
            }
            Err(SubmitError::Write(err))
        }
    }
}
