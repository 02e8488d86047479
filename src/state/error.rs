//! Precondition failures of form operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("lift index {index} out of bounds (have {len})")]
    LiftIndexOutOfBounds { index: usize, len: usize },

    #[error("the last remaining lift cannot be removed")]
    LastLift,

    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    #[error("file name is not valid UTF-8: {0}")]
    NonUtf8FileName(PathBuf),
}
