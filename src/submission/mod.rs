//! Submitting a completed signup to storage

mod record;
mod workflow;

pub use record::SubmissionRecord;
pub use workflow::{submit, SubmissionReceipt, SubmissionSettings};
