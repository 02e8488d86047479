//! Storage collaborators: blob store, document store and clock

mod clock;
mod error;
mod firebase;
mod local;
mod traits;

pub use clock::SystemClock;
pub use error::{StorageError, SubmitError};
pub use firebase::{FirebaseBlobStore, FirestoreDocumentStore};
pub use local::{LocalBlobStore, LocalDocumentStore};
pub use traits::{BlobStore, Clock, DocumentId, DocumentStore};

#[cfg(test)]
pub use error::WriteError;
#[cfg(test)]
pub use traits::{MockBlobStore, MockClock, MockDocumentStore};

use crate::config::{BackendKind, SignupConfig};
use anyhow::{Context, Result};
use std::sync::Arc;

/// The collaborators a submission talks to
#[derive(Clone)]
pub struct Services {
    pub blobs: Arc<dyn BlobStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub clock: Arc<dyn Clock>,
}

impl Services {
    /// Build the backend selected in `config`
    pub fn from_config(config: &SignupConfig) -> Result<Self> {
        let services = match config.backend {
            BackendKind::Local => {
                let root = config.data_dir();
                tracing::info!("using local storage at {}", root.display());
                Self {
                    blobs: Arc::new(LocalBlobStore::new(root.join("blobs"))),
                    documents: Arc::new(LocalDocumentStore::new(root.join("collections"))),
                    clock: Arc::new(SystemClock),
                }
            }
            BackendKind::Firebase => {
                let firebase = config.firebase()?;
                let http = reqwest::Client::builder()
                    .user_agent(concat!("repmate-signup/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .context("building HTTP client")?;
                tracing::info!(project = %firebase.project_id, "using firebase storage");
                Self {
                    blobs: Arc::new(FirebaseBlobStore::new(http.clone(), firebase)),
                    documents: Arc::new(FirestoreDocumentStore::new(http, firebase)),
                    clock: Arc::new(SystemClock),
                }
            }
        };
        Ok(services)
    }
}
