//! Payloads exchanged with the submission backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the backend for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub reference_id: String,
    pub message: String,
    pub estimated_processing_time: String,
    pub data: ReceiptData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptData {
    pub submitted_at: DateTime<Utc>,
    pub status: String,
    pub applicant_id: String,
}

/// Backend verdict for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResponse {
    Accepted(SubmissionReceipt),
    Rejected { message: String, error_code: String },
}

impl SubmissionResponse {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionResponse::Accepted(_))
    }
}
