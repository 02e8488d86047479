//! Firebase REST backend (Cloud Firestore documents, Firebase Storage blobs)

use super::error::{StorageError, WriteError};
use super::traits::{BlobStore, DocumentId, DocumentStore};
use crate::config::FirebaseConfig;
use crate::submission::SubmissionRecord;
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Append path segments to a base URL, percent-encoding each one
fn join_segments<'a>(
    base: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| format!("{base}: {e}"))?;
    url.path_segments_mut()
        .map_err(|_| format!("{base}: cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Firestore documents created through the REST API
pub struct FirestoreDocumentStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    name: String,
}

impl FirestoreDocumentStore {
    pub fn new(http: reqwest::Client, config: &FirebaseConfig) -> Self {
        Self {
            http,
            base_url: config.firestore_url.clone(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str) -> Result<Url, WriteError> {
        let mut url = join_segments(
            &self.base_url,
            [
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                collection,
            ],
        )
        .map_err(WriteError::InvalidEndpoint)?;
        if !self.api_key.is_empty() {
            url.query_pairs_mut().append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}

/// Encode a JSON value as a Firestore typed value
fn firestore_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                json!({ "integerValue": n.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.into_iter().map(firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": firestore_fields(map) } }),
    }
}

fn firestore_fields(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (key, firestore_value(value)))
        .collect()
}

/// Request body for a new submission document; `submittedAt` becomes a native timestamp
fn document_body(record: &SubmissionRecord) -> Result<Value, WriteError> {
    let Value::Object(map) = serde_json::to_value(record)? else {
        return Err(WriteError::InvalidResponse(
            "submission did not serialize to an object".to_string(),
        ));
    };
    let mut fields = firestore_fields(map);
    fields.insert(
        "submittedAt".to_string(),
        json!({
            "timestampValue": record.submitted_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        }),
    );
    Ok(json!({ "fields": fields }))
}

/// Last segment of a resource name like `projects/p/databases/(default)/documents/c/ID`
fn document_id_from_name(name: &str) -> Result<DocumentId, WriteError> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(DocumentId::new)
        .ok_or_else(|| WriteError::InvalidResponse(format!("unexpected document name: {name}")))
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        record: &SubmissionRecord,
    ) -> Result<DocumentId, WriteError> {
        let url = self.collection_url(collection)?;
        let body = document_body(record)?;

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WriteError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedDocument = response.json().await?;
        document_id_from_name(&created.name)
    }
}

/// Objects in a Firebase Storage bucket
pub struct FirebaseBlobStore {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct UploadedObject {
    name: String,
    #[serde(rename = "downloadTokens")]
    download_tokens: Option<String>,
}

impl FirebaseBlobStore {
    pub fn new(http: reqwest::Client, config: &FirebaseConfig) -> Self {
        Self {
            http,
            base_url: config.storage_url.clone(),
            bucket: config.storage_bucket.clone(),
        }
    }

    fn bucket_url(&self) -> Result<Url, StorageError> {
        join_segments(&self.base_url, ["b", self.bucket.as_str(), "o"])
            .map_err(StorageError::InvalidEndpoint)
    }

    /// Object path; the whole key is a single segment so `/` becomes `%2F`
    fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        join_segments(&self.base_url, ["b", self.bucket.as_str(), "o", key])
            .map_err(StorageError::InvalidEndpoint)
    }

    fn download_url(&self, key: &str, tokens: Option<&str>) -> Result<Url, StorageError> {
        let mut url = self.object_url(key)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("alt", "media");
            if let Some(token) = tokens.and_then(|t| t.split(',').next()).filter(|t| !t.is_empty()) {
                query.append_pair("token", token);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl BlobStore for FirebaseBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let mut url = self.bucket_url()?;
        url.query_pairs_mut().append_pair("name", key);

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let object: UploadedObject = response.json().await?;
        if object.name.is_empty() {
            return Err(StorageError::InvalidResponse(
                "upload response has no object name".to_string(),
            ));
        }
        let url = self.download_url(&object.name, object.download_tokens.as_deref())?;
        Ok(url.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let url = self.object_url(key)?;
        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
