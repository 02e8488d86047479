//! File chosen for upload alongside the submission

use super::error::FormError;
use std::path::{Path, PathBuf};

/// Reference to a local file; bytes are read only when submitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub path: PathBuf,
}

impl UploadedFile {
    /// Reference an existing regular file, naming it after its last path component
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(FormError::NotAFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .ok_or_else(|| FormError::NotAFile(path.to_path_buf()))?
            .to_str()
            .ok_or_else(|| FormError::NonUtf8FileName(path.to_path_buf()))?
            .to_string();

        Ok(Self {
            name,
            path: path.to_path_buf(),
        })
    }
}
