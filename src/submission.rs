//! Submission of a completed application to a backend.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use assist_domain::{FieldName, FormRecord, ReceiptData, SubmissionReceipt, SubmissionResponse};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

pub use crate::errors::{SubmitError, SubmitTransportError};

const RECEIVED_MESSAGE: &str = "Application has been received and is under review";
const PROCESSING_TIME: &str = "3-5 business days";
const PENDING_STATUS: &str = "pending_review";

/// Backend that accepts or rejects a completed application.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, record: &FormRecord)
        -> Result<SubmissionResponse, SubmitTransportError>;
}

/// Stand-in backend: waits a fixed latency and always accepts.
#[derive(Debug)]
pub struct MockSubmitter {
    latency: Duration,
    sequence: AtomicU64,
}

impl MockSubmitter {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of applications accepted so far.
    pub fn accepted(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Default for MockSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl Submitter for MockSubmitter {
    async fn submit(
        &self,
        record: &FormRecord,
    ) -> Result<SubmissionResponse, SubmitTransportError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.sequence.fetch_add(1, Ordering::SeqCst);

        let now = Utc::now();
        let mut rng = rand::rng();
        let national_id = record.get(FieldName::NationalId).trim();
        let applicant_id = if national_id.is_empty() {
            format!("USER-{}", rng.random_range(0..10_000))
        } else {
            national_id.to_string()
        };

        Ok(SubmissionResponse::Accepted(SubmissionReceipt {
            reference_id: format!(
                "APP-{}-{}",
                now.timestamp_millis(),
                rng.random_range(0..1_000)
            ),
            message: RECEIVED_MESSAGE.to_string(),
            estimated_processing_time: PROCESSING_TIME.to_string(),
            data: ReceiptData {
                submitted_at: now,
                status: PENDING_STATUS.to_string(),
                applicant_id,
            },
        }))
    }
}

/// Read-only view of the "submission in flight" flag.
#[derive(Debug, Clone)]
pub struct SubmittingFlag(Arc<AtomicBool>);

impl SubmittingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Clears the submitting flag when dropped, including when the submit
/// future is cancelled mid-flight.
struct SubmittingGuard(Arc<AtomicBool>);

impl SubmittingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Tracks the submitting flag and the terminal submitted state.
#[derive(Debug, Default)]
pub struct SubmissionOrchestrator {
    submitting: Arc<AtomicBool>,
    receipt: Option<SubmissionReceipt>,
}

impl SubmissionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(&self) -> SubmittingFlag {
        SubmittingFlag(Arc::clone(&self.submitting))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn is_submitted(&self) -> bool {
        self.receipt.is_some()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// Sends `record` once. On acceptance the receipt is kept and the
    /// orchestrator becomes terminal until [`reset`](Self::reset).
    pub async fn submit(
        &mut self,
        record: &FormRecord,
        submitter: &dyn Submitter,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if self.is_submitted() {
            return Err(SubmitError::AlreadySubmitted);
        }
        let _guard =
            SubmittingGuard::acquire(&self.submitting).ok_or(SubmitError::AlreadySubmitting)?;

        match submitter.submit(record).await {
            Ok(SubmissionResponse::Accepted(receipt)) => {
                info!(reference = %receipt.reference_id, "application accepted");
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Ok(SubmissionResponse::Rejected {
                message,
                error_code,
            }) => {
                warn!(code = %error_code, "application rejected");
                Err(SubmitError::Rejected {
                    message,
                    error_code,
                })
            }
            Err(err) => {
                warn!(error = %err, "submission transport failure");
                Err(err.into())
            }
        }
    }

    /// Leaves the submitted state.
    pub fn reset(&mut self) {
        self.receipt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_uses_national_id_as_applicant_id() {
        let mut record = FormRecord::new();
        record.set(FieldName::NationalId, "A1B2C3D4");
        let submitter = MockSubmitter::new(Duration::ZERO);

        let SubmissionResponse::Accepted(receipt) = submitter.submit(&record).await.expect("submit")
        else {
            panic!("mock submitter always accepts");
        };
        assert_eq!(receipt.data.applicant_id, "A1B2C3D4");
        assert_eq!(receipt.data.status, "pending_review");
        assert!(receipt.reference_id.starts_with("APP-"));
        assert_eq!(submitter.accepted(), 1);
    }

    #[tokio::test]
    async fn mock_invents_applicant_id_without_national_id() {
        let submitter = MockSubmitter::new(Duration::ZERO);
        let SubmissionResponse::Accepted(receipt) =
            submitter.submit(&FormRecord::new()).await.expect("submit")
        else {
            panic!("mock submitter always accepts");
        };
        assert!(receipt.data.applicant_id.starts_with("USER-"));
    }

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        let guard = SubmittingGuard::acquire(&flag).expect("first acquire");
        assert!(SubmittingGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(!flag.load(Ordering::SeqCst));
        assert!(SubmittingGuard::acquire(&flag).is_some());
    }
}
