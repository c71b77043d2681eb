//! One applicant's pass through the form.
//!
//! [`ApplicationSession`] wires the store, navigator, auto-save gateway and
//! the submission and suggestion orchestrators together. Every field write
//! validates, schedules a save and recomputes completeness before returning.

use std::{sync::Arc, time::Duration};

use assist_config::Config;
use assist_core::{is_step_complete, FieldError, FormStore, SlotStorage};
use assist_domain::{FieldName, FormRecord, Locale, StepIndex, SubmissionReceipt};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    errors::{SessionError, SubmitError, SuggestionError},
    i18n::Catalog,
    navigation::{NavOutcome, Navigator},
    persistence::{PersistedSnapshot, PersistenceGateway},
    submission::{SubmissionOrchestrator, Submitter, SubmittingFlag},
    suggestion::{SuggestionOrchestrator, SuggestionProvider, SuggestionState},
};

/// What the caller should present when the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    Fresh,
    /// A saved application exists; auto-save stays off until
    /// [`ApplicationSession::resolve_restore`] is called.
    RestoreOffered {
        saved_at: Option<DateTime<Utc>>,
        step: StepIndex,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreChoice {
    Restore,
    Discard,
}

/// Result of writing one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: FieldName,
    pub error: Option<FieldError>,
    /// Completeness of the step the field belongs to, after the write.
    pub step_complete: bool,
}

pub struct ApplicationSession {
    id: Uuid,
    locale: Locale,
    store: FormStore,
    navigator: Navigator,
    gateway: PersistenceGateway,
    submission: SubmissionOrchestrator,
    suggestions: SuggestionOrchestrator,
    pending_restore: Option<PersistedSnapshot>,
}

impl ApplicationSession {
    pub fn new(storage: Arc<dyn SlotStorage>, config: &Config) -> Self {
        let locale = config.locale.parse().unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            locale,
            store: FormStore::with_localizer(Catalog::shared(locale)),
            navigator: Navigator::new(is_step_complete),
            gateway: PersistenceGateway::new(storage, config.autosave.debounce()),
            submission: SubmissionOrchestrator::new(),
            suggestions: SuggestionOrchestrator::from_settings(&config.suggestions),
            pending_restore: None,
        }
    }

    /// Session with default settings except for the debounce window.
    pub fn with_debounce(storage: Arc<dyn SlotStorage>, debounce: Duration) -> Self {
        let mut config = Config::default();
        config.autosave.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        Self::new(storage, &config)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Entry decision: offer a saved application, or arm auto-save at once.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn start(&mut self) -> StartupState {
        match self.gateway.load() {
            Some(snapshot) => {
                let state = StartupState::RestoreOffered {
                    saved_at: snapshot.saved_at,
                    step: snapshot.step,
                };
                info!(step = %snapshot.step, "saved application found");
                self.pending_restore = Some(snapshot);
                state
            }
            None => {
                self.gateway.arm();
                StartupState::Fresh
            }
        }
    }

    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// Applies the user's answer to the restore offer and arms auto-save.
    #[instrument(skip_all, fields(session = %self.id, choice = ?choice))]
    pub fn resolve_restore(&mut self, choice: RestoreChoice) -> Result<StepIndex, SessionError> {
        let snapshot = self
            .pending_restore
            .take()
            .ok_or(SessionError::NoPendingRestore)?;

        match choice {
            RestoreChoice::Restore => {
                self.store.reset_all(Some(snapshot.record));
                self.navigator.set_current(snapshot.step);
                self.store.validate_all();
                info!(step = %snapshot.step, "saved application restored");
            }
            RestoreChoice::Discard => {
                self.gateway.clear();
                info!("saved application discarded");
            }
        }
        self.gateway.arm();
        Ok(self.navigator.current())
    }

    pub fn set_field(
        &mut self,
        field: FieldName,
        value: impl Into<String>,
    ) -> Result<FieldUpdate, SessionError> {
        self.ensure_editable()?;
        let error = self.store.set_field(field, value).cloned();
        self.gateway
            .schedule_save(self.store.record(), self.navigator.current());
        let step_complete = self.navigator.is_step_complete(field.step(), &self.store);
        debug!(field = %field, valid = error.is_none(), step_complete, "field updated");
        Ok(FieldUpdate {
            field,
            error,
            step_complete,
        })
    }

    pub fn next_step(&mut self) -> Result<NavOutcome, SessionError> {
        self.ensure_editable()?;
        let outcome = self.navigator.advance(&mut self.store);
        if outcome.moved() {
            self.gateway
                .schedule_save(self.store.record(), self.navigator.current());
        }
        Ok(outcome)
    }

    pub fn previous_step(&mut self) -> Result<NavOutcome, SessionError> {
        self.ensure_editable()?;
        let outcome = self.navigator.retreat();
        if outcome.moved() {
            self.gateway
                .schedule_save(self.store.record(), self.navigator.current());
        }
        Ok(outcome)
    }

    pub fn current_step(&self) -> StepIndex {
        self.navigator.current()
    }

    pub fn is_step_complete(&self, step: StepIndex) -> bool {
        self.navigator.is_step_complete(step, &self.store)
    }

    pub fn is_current_step_complete(&self) -> bool {
        self.navigator.is_current_complete(&self.store)
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn record(&self) -> &FormRecord {
        self.store.record()
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.locale)
    }

    /// Switches the message language; existing error messages are re-rendered.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.store.set_localizer(Catalog::shared(locale));
    }

    /// Validates everything and sends the record. Only allowed from the last
    /// step with every step complete.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn submit(
        &mut self,
        submitter: &dyn Submitter,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if self.submission.is_submitted() {
            return Err(SubmitError::AlreadySubmitted);
        }
        if self.submission.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }
        let current = self.navigator.current();
        if !current.is_last() {
            return Err(SubmitError::Incomplete { step: current });
        }
        self.store.validate_all();
        if let Some(step) = self.navigator.first_incomplete_step(&self.store) {
            return Err(SubmitError::Incomplete { step });
        }

        let record = self.store.get_all();
        let receipt = self.submission.submit(&record, submitter).await?;
        self.gateway.clear();
        Ok(receipt)
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    pub fn submitting_flag(&self) -> SubmittingFlag {
        self.submission.flag()
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_submitted()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.submission.receipt()
    }

    /// Starts a blank application after a successful submission.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn reset_for_another(&mut self) {
        self.submission.reset();
        self.suggestions.discard();
        self.store.reset_all(None);
        self.navigator.reset();
        self.gateway.clear();
        info!("ready for another application");
    }

    pub async fn request_suggestion(
        &mut self,
        field: FieldName,
        provider: &dyn SuggestionProvider,
    ) -> Result<&SuggestionState, SuggestionError> {
        let locale = self.locale;
        self.suggestions.generate(field, provider, locale).await
    }

    pub fn suggestion(&self) -> &SuggestionState {
        self.suggestions.state()
    }

    /// Writes the suggested (or user-edited) text into its field.
    pub fn accept_suggestion(
        &mut self,
        edited: Option<String>,
    ) -> Result<FieldUpdate, SessionError> {
        self.ensure_editable()?;
        let (field, text) = self
            .suggestions
            .take_accepted(edited)
            .ok_or(SessionError::NoSuggestion)?;
        self.set_field(field, text)
    }

    pub fn discard_suggestion(&mut self) {
        self.suggestions.discard();
    }

    /// Writes a pending debounced save immediately.
    pub fn flush(&mut self) -> bool {
        self.gateway.flush()
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.submission.is_submitted() {
            Err(SessionError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }
}
