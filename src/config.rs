//! Configuration for the signup app

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default document collection for submissions
pub const DEFAULT_COLLECTION: &str = "coach_submissions";

/// Default key prefix for uploaded files
pub const DEFAULT_UPLOAD_PREFIX: &str = "uploadedFiles";

const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_STORAGE_URL: &str = "https://firebasestorage.googleapis.com/v0";

/// Where submissions are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Files under the data directory
    #[default]
    Local,
    /// Cloud Firestore + Firebase Storage
    Firebase,
}

/// Firebase project settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub storage_bucket: String,
    /// Firestore REST endpoint (override for the emulator)
    pub firestore_url: String,
    /// Firebase Storage REST endpoint (override for the emulator)
    pub storage_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            storage_bucket: String::new(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
        }
    }
}

impl FirebaseConfig {
    /// Names of required settings that are still empty
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.project_id.is_empty() {
            missing.push("project_id");
        }
        if self.storage_bucket.is_empty() {
            missing.push("storage_bucket");
        }
        missing
    }
}

/// App configuration, built once at startup and passed to whoever needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    pub backend: BackendKind,
    /// Root for local storage and the log file
    pub data_dir: Option<PathBuf>,
    pub firebase: Option<FirebaseConfig>,
    /// Collection receiving submission documents
    pub collection: String,
    /// Key prefix for uploaded files
    pub upload_prefix: String,
    /// Refuse to submit until required fields are filled in
    pub require_complete: bool,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: None,
            firebase: None,
            collection: DEFAULT_COLLECTION.to_string(),
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            require_complete: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "repmate", "repmate-signup")
}

impl SignupConfig {
    /// Default config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from `REPMATE_CONFIG` or the default path, then apply env overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var_os("REPMATE_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Apply `REPMATE_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(backend) = lookup("REPMATE_BACKEND") {
            self.backend = match backend.to_ascii_lowercase().as_str() {
                "local" => BackendKind::Local,
                "firebase" => BackendKind::Firebase,
                other => bail!("unknown REPMATE_BACKEND {other:?} (expected local or firebase)"),
            };
        }
        if let Some(dir) = lookup("REPMATE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        let api_key = lookup("REPMATE_FIREBASE_API_KEY");
        let project_id = lookup("REPMATE_FIREBASE_PROJECT_ID");
        let bucket = lookup("REPMATE_FIREBASE_BUCKET");
        if api_key.is_some() || project_id.is_some() || bucket.is_some() {
            let firebase = self.firebase.get_or_insert_with(FirebaseConfig::default);
            if let Some(value) = api_key {
                firebase.api_key = value;
            }
            if let Some(value) = project_id {
                firebase.project_id = value;
            }
            if let Some(value) = bucket {
                firebase.storage_bucket = value;
            }
        }
        Ok(())
    }

    /// Directory for local storage and logs
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".repmate"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("repmate-signup.log")
    }

    /// Firebase settings, validated for use
    pub fn firebase(&self) -> Result<&FirebaseConfig> {
        let Some(firebase) = self.firebase.as_ref() else {
            bail!("backend is firebase but no firebase settings are configured");
        };
        let missing = firebase.missing_settings();
        if !missing.is_empty() {
            bail!("firebase settings missing: {}", missing.join(", "));
        }
        Ok(firebase)
    }
}
