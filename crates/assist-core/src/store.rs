//! In-memory form state: field values plus the errors shadowing them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use assist_domain::{FieldName, FormRecord, StepIndex};

use crate::i18n::{Localizer, NoTranslations};
use crate::validation::{validate, ValidationIssue};

/// A failing field: the typed issue plus its rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub issue: ValidationIssue,
    pub message: String,
}

impl FieldError {
    pub fn new(issue: ValidationIssue, message: impl Into<String>) -> Self {
        Self {
            issue,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors for fields currently failing validation, and only those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<FieldName, FieldError>,
}

impl FieldErrors {
    pub fn contains(&self, field: FieldName) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldError> {
        self.entries.get(&field)
    }

    pub fn insert(&mut self, field: FieldName, error: FieldError) {
        self.entries.insert(field, error);
    }

    pub fn remove(&mut self, field: FieldName) -> Option<FieldError> {
        self.entries.remove(&field)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldError)> + '_ {
        self.entries.iter().map(|(field, error)| (*field, error))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds the current [`FormRecord`] and its [`FieldErrors`].
///
/// Every edit re-runs the full field validator. Untouched fields carry no
/// error until a step is force-validated (`validate_*`).
pub struct FormStore {
    record: FormRecord,
    errors: FieldErrors,
    localizer: Arc<dyn Localizer>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_localizer(Arc::new(NoTranslations))
    }

    pub fn with_localizer(localizer: Arc<dyn Localizer>) -> Self {
        Self {
            record: FormRecord::new(),
            errors: FieldErrors::default(),
            localizer,
        }
    }

    /// Swaps the message catalog and re-renders existing error messages.
    pub fn set_localizer(&mut self, localizer: Arc<dyn Localizer>) {
        self.localizer = localizer;
        let issues: Vec<_> = self
            .errors
            .iter()
            .map(|(field, error)| (field, error.issue))
            .collect();
        for (field, issue) in issues {
            let error = self.render(issue);
            self.errors.insert(field, error);
        }
    }

    /// Overwrites a value and re-validates it. Clearing a field flags it as
    /// required; partial input is only held to the format rules.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) -> Option<&FieldError> {
        self.record.set(field, value);
        let verdict = validate(field, self.record.get(field));
        self.apply(field, verdict);
        self.errors.get(field)
    }

    /// Full validation (required + format) of one field.
    pub fn validate_field(&mut self, field: FieldName) -> Result<(), ValidationIssue> {
        let verdict = validate(field, self.record.get(field));
        self.apply(field, verdict);
        verdict
    }

    /// Force-validates every field of `step`; true when none fail.
    pub fn validate_step(&mut self, step: StepIndex) -> bool {
        step.fields()
            .iter()
            .fold(true, |ok, field| self.validate_field(*field).is_ok() && ok)
    }

    pub fn validate_all(&mut self) -> bool {
        StepIndex::all()
            .into_iter()
            .fold(true, |ok, step| self.validate_step(step) && ok)
    }

    pub fn get(&self, field: FieldName) -> &str {
        self.record.get(field)
    }

    pub fn get_all(&self) -> FormRecord {
        self.record.clone()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FieldName) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Replaces the whole record (`None` restores empty defaults) and drops
    /// every error.
    pub fn reset_all(&mut self, record: Option<FormRecord>) {
        self.record = record.unwrap_or_default();
        self.errors.clear();
    }

    fn apply(&mut self, field: FieldName, verdict: Result<(), ValidationIssue>) {
        match verdict {
            Ok(()) => {
                self.errors.remove(field);
            }
            Err(issue) => {
                let error = self.render(issue);
                self.errors.insert(field, error);
            }
        }
    }

    fn render(&self, issue: ValidationIssue) -> FieldError {
        let message = self
            .localizer
            .text(issue.message_key())
            .unwrap_or_else(|| issue.to_string());
        FieldError::new(issue, message)
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}
