//! Lifecycle of the AI writing-suggestion popup for narrative fields.
//!
//! A request moves `idle -> loading -> suggested | errored`. Starting a new
//! request supersedes the previous one: its [`SuggestionTicket`] goes stale
//! and a late result for it is dropped.

mod canned;

pub use canned::{canned_suggestions, pick_canned};

use std::time::Duration;

use assist_config::SuggestionSettings;
use assist_domain::{FieldName, Locale};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub use crate::errors::SuggestionError;

/// Source of generated narrative text.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn generate(&self, field: FieldName, locale: Locale) -> Result<String, SuggestionError>;
}

/// Provider for hosts with no credentials configured. Every request reports
/// a missing credential, which surfaces a canned suggestion.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

#[async_trait]
impl SuggestionProvider for OfflineProvider {
    async fn generate(&self, _field: FieldName, _locale: Locale) -> Result<String, SuggestionError> {
        Err(SuggestionError::MissingCredential)
    }
}

/// Transient popup state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    pub is_open: bool,
    pub target_field: Option<FieldName>,
    pub suggestion_text: String,
    pub is_loading: bool,
    pub error: Option<SuggestionError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionPhase {
    Idle,
    Loading,
    Suggested,
    Errored,
}

impl SuggestionState {
    pub fn phase(&self) -> SuggestionPhase {
        if !self.is_open {
            SuggestionPhase::Idle
        } else if self.is_loading {
            SuggestionPhase::Loading
        } else if self.error.is_some() {
            SuggestionPhase::Errored
        } else {
            SuggestionPhase::Suggested
        }
    }
}

/// Identifies one suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket {
    generation: u64,
    field: FieldName,
}

impl SuggestionTicket {
    pub fn field(&self) -> FieldName {
        self.field
    }
}

#[derive(Debug)]
pub struct SuggestionOrchestrator {
    state: SuggestionState,
    generation: u64,
    timeout: Option<Duration>,
    fallback_delay: Duration,
}

impl SuggestionOrchestrator {
    pub fn new(timeout: Option<Duration>, fallback_delay: Duration) -> Self {
        Self {
            state: SuggestionState::default(),
            generation: 0,
            timeout,
            fallback_delay,
        }
    }

    pub fn from_settings(settings: &SuggestionSettings) -> Self {
        Self::new(settings.timeout(), settings.fallback_delay())
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    /// Opens the popup in loading state for `field`.
    pub fn begin(&mut self, field: FieldName) -> Result<SuggestionTicket, SuggestionError> {
        if !field.supports_suggestion() {
            return Err(SuggestionError::Unsupported(field));
        }
        self.generation += 1;
        self.state = SuggestionState {
            is_open: true,
            target_field: Some(field),
            suggestion_text: String::new(),
            is_loading: true,
            error: None,
        };
        debug!(field = %field, generation = self.generation, "suggestion requested");
        Ok(SuggestionTicket {
            generation: self.generation,
            field,
        })
    }

    /// Applies the outcome of `ticket`. Returns false, leaving the state
    /// untouched, when the ticket has been superseded or the popup closed.
    pub fn complete(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<String, SuggestionError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.state.is_loading {
            debug!(field = %ticket.field, "dropping stale suggestion result");
            return false;
        }
        self.state.is_loading = false;
        match result {
            Ok(text) if text.trim().is_empty() => {
                self.state.error = Some(SuggestionError::EmptyResult);
            }
            Ok(text) => {
                self.state.suggestion_text = text;
            }
            Err(err) => {
                self.state.error = Some(err);
            }
        }
        true
    }

    /// Runs one request end to end: deadline, canned fallback for quota and
    /// credential failures, classification of everything else.
    pub async fn generate(
        &mut self,
        field: FieldName,
        provider: &dyn SuggestionProvider,
        locale: Locale,
    ) -> Result<&SuggestionState, SuggestionError> {
        let ticket = self.begin(field)?;

        let request = provider.generate(field, locale);
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or(Err(SuggestionError::Timeout)),
            None => request.await,
        };

        let outcome = match outcome {
            Ok(text) if text.trim().is_empty() => Err(SuggestionError::EmptyResult),
            Err(err) if err.uses_fallback() => {
                info!(field = %field, reason = %err, "using canned suggestion");
                tokio::time::sleep(self.fallback_delay).await;
                pick_canned(field, locale)
                    .map(str::to_string)
                    .ok_or(err)
            }
            other => other,
        };
        if let Err(err) = &outcome {
            warn!(field = %field, error = %err, "suggestion failed");
        }

        self.complete(ticket, outcome);
        Ok(&self.state)
    }

    /// Closes the popup and hands back the target field with the text to
    /// write, preferring `edited` over the generated text.
    pub fn take_accepted(&mut self, edited: Option<String>) -> Option<(FieldName, String)> {
        if self.state.phase() != SuggestionPhase::Suggested {
            return None;
        }
        let field = self.state.target_field?;
        let text = edited.unwrap_or_else(|| std::mem::take(&mut self.state.suggestion_text));
        self.discard();
        Some((field, text))
    }

    /// Resets to idle without touching the form.
    pub fn discard(&mut self) {
        self.state = SuggestionState::default();
    }
}

impl Default for SuggestionOrchestrator {
    fn default() -> Self {
        Self::from_settings(&SuggestionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_narrative_fields_are_rejected_without_opening_the_popup() {
        let mut orchestrator = SuggestionOrchestrator::default();
        assert_eq!(
            orchestrator.begin(FieldName::Email),
            Err(SuggestionError::Unsupported(FieldName::Email))
        );
        assert_eq!(orchestrator.state().phase(), SuggestionPhase::Idle);
    }

    #[test]
    fn stale_ticket_does_not_overwrite_the_current_request() {
        let mut orchestrator = SuggestionOrchestrator::default();
        let first = orchestrator
            .begin(FieldName::FinancialSituation)
            .expect("first");
        let second = orchestrator
            .begin(FieldName::ReasonForApplying)
            .expect("second");

        assert!(!orchestrator.complete(first, Ok("old".into())));
        assert_eq!(orchestrator.state().phase(), SuggestionPhase::Loading);

        assert!(orchestrator.complete(second, Ok("new".into())));
        let state = orchestrator.state();
        assert_eq!(state.target_field, Some(FieldName::ReasonForApplying));
        assert_eq!(state.suggestion_text, "new");
    }

    #[test]
    fn blank_result_is_an_empty_result_error() {
        let mut orchestrator = SuggestionOrchestrator::default();
        let ticket = orchestrator
            .begin(FieldName::FinancialSituation)
            .expect("ticket");
        orchestrator.complete(ticket, Ok("   ".into()));
        assert_eq!(orchestrator.state().error, Some(SuggestionError::EmptyResult));
        assert_eq!(orchestrator.state().phase(), SuggestionPhase::Errored);
    }

    #[test]
    fn accept_prefers_edited_text_and_resets() {
        let mut orchestrator = SuggestionOrchestrator::default();
        let ticket = orchestrator
            .begin(FieldName::EmploymentCircumstances)
            .expect("ticket");
        orchestrator.complete(ticket, Ok("generated".into()));

        let accepted = orchestrator.take_accepted(Some("edited".into()));
        assert_eq!(
            accepted,
            Some((FieldName::EmploymentCircumstances, "edited".to_string()))
        );
        assert_eq!(orchestrator.state(), &SuggestionState::default());
        assert!(orchestrator.take_accepted(None).is_none());
    }

    #[test]
    fn discard_after_completion_ignores_late_results() {
        let mut orchestrator = SuggestionOrchestrator::default();
        let ticket = orchestrator
            .begin(FieldName::FinancialSituation)
            .expect("ticket");
        orchestrator.discard();
        assert!(!orchestrator.complete(ticket, Ok("late".into())));
        assert_eq!(orchestrator.state().phase(), SuggestionPhase::Idle);
    }
}
