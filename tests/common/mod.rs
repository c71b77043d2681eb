#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use assist_form::{
    domain::{FieldName, FormRecord, Locale, StepIndex, SubmissionResponse},
    errors::{SubmitTransportError, SuggestionError},
    persistence::MemoryStorage,
    session::ApplicationSession,
    submission::{Submitter, SubmittingFlag},
    suggestion::SuggestionProvider,
};
use async_trait::async_trait;

pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// A value for every field that passes validation.
pub fn valid_value(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "Jane Doe",
        FieldName::NationalId => "A1B2C3D4",
        FieldName::DateOfBirth => "1990-04-12",
        FieldName::Gender => "female",
        FieldName::Address => "12 Palm Street",
        FieldName::City => "Dubai",
        FieldName::State => "Dubai",
        FieldName::Country => "UAE",
        FieldName::Phone => "+971501234567",
        FieldName::Email => "jane@example.com",
        FieldName::MaritalStatus => "single",
        FieldName::Dependents => "2",
        FieldName::EmploymentStatus => "employed",
        FieldName::MonthlyIncome => "3500",
        FieldName::HousingStatus => "renting",
        FieldName::FinancialSituation => "Medical bills have outgrown my income.",
        FieldName::EmploymentCircumstances => "Part-time retail work.",
        FieldName::ReasonForApplying => "Bridge the gap until I find full-time work.",
    }
}

pub fn filled_record() -> FormRecord {
    let mut record = FormRecord::new();
    for field in FieldName::ALL {
        record.set(field, valid_value(field));
    }
    record
}

/// Fresh session over in-memory storage, already past the entry decision.
pub fn fresh_session() -> (ApplicationSession, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = ApplicationSession::with_debounce(storage.clone(), DEBOUNCE);
    session.start();
    (session, storage)
}

pub fn fill_step(session: &mut ApplicationSession, step: StepIndex) {
    for field in step.fields() {
        session
            .set_field(*field, valid_value(*field))
            .expect("field write");
    }
}

/// Fills every step and walks to the last one.
pub fn complete_form(session: &mut ApplicationSession) {
    fill_step(session, StepIndex::FIRST);
    assert!(session.next_step().expect("advance").moved());
    fill_step(session, StepIndex::SECOND);
    assert!(session.next_step().expect("advance").moved());
    fill_step(session, StepIndex::LAST);
}

pub struct RejectingSubmitter;

#[async_trait]
impl Submitter for RejectingSubmitter {
    async fn submit(
        &self,
        _record: &FormRecord,
    ) -> Result<SubmissionResponse, SubmitTransportError> {
        Ok(SubmissionResponse::Rejected {
            message: "Service temporarily unavailable. Please try again later.".into(),
            error_code: "SERVICE_UNAVAILABLE".into(),
        })
    }
}

pub struct BrokenSubmitter;

#[async_trait]
impl Submitter for BrokenSubmitter {
    async fn submit(
        &self,
        _record: &FormRecord,
    ) -> Result<SubmissionResponse, SubmitTransportError> {
        Err(SubmitTransportError("connection reset".into()))
    }
}

/// Never answers within any reasonable deadline.
pub struct StalledSubmitter;

#[async_trait]
impl Submitter for StalledSubmitter {
    async fn submit(
        &self,
        _record: &FormRecord,
    ) -> Result<SubmissionResponse, SubmitTransportError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(SubmitTransportError("gave up".into()))
    }
}

/// Records whether the submitting flag was raised while it was called.
pub struct ObservingSubmitter {
    pub flag: SubmittingFlag,
    pub saw_flag: AtomicBool,
}

impl ObservingSubmitter {
    pub fn new(flag: SubmittingFlag) -> Self {
        Self {
            flag,
            saw_flag: AtomicBool::new(false),
        }
    }

    pub fn saw_flag(&self) -> bool {
        self.saw_flag.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Submitter for ObservingSubmitter {
    async fn submit(
        &self,
        _record: &FormRecord,
    ) -> Result<SubmissionResponse, SubmitTransportError> {
        self.saw_flag.store(self.flag.is_set(), Ordering::SeqCst);
        Err(SubmitTransportError("observed".into()))
    }
}

/// Answers every request with a fixed outcome, optionally after a delay.
pub struct ScriptedProvider {
    pub outcome: Result<String, SuggestionError>,
    pub delay: Duration,
}

impl ScriptedProvider {
    pub fn answering(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(err: SuggestionError) -> Self {
        Self {
            outcome: Err(err),
            delay: Duration::ZERO,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            outcome: Ok("too late".to_string()),
            delay,
        }
    }
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
    async fn generate(&self, _field: FieldName, _locale: Locale) -> Result<String, SuggestionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}
