//! Storage and submission error types

use thiserror::Error;

/// Blob store failure
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("blob store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid blob key: {0}")]
    InvalidKey(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Document store failure
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("document store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Why a submission attempt failed
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("upload failed")]
    Upload(#[source] StorageError),

    #[error("document write failed")]
    Write(#[source] WriteError),
}
