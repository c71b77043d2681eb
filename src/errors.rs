use assist_config::ConfigError;
use assist_core::CoreError;
use assist_domain::{FieldName, StepIndex};
use thiserror::Error;

/// Failures of session operations other than submission.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("The application has already been submitted. Start another one first.")]
    AlreadySubmitted,
    #[error("There is no saved application waiting to be restored or discarded.")]
    NoPendingRestore,
    #[error("There is no suggestion ready to accept.")]
    NoSuggestion,
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of a submission attempt that did not produce a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Step {step} is not complete yet.")]
    Incomplete { step: StepIndex },
    #[error("A submission is already in progress.")]
    AlreadySubmitting,
    #[error("The application has already been submitted.")]
    AlreadySubmitted,
    #[error("Submission rejected ({error_code}): {message}")]
    Rejected { message: String, error_code: String },
    #[error("Submission failed: {0}")]
    Transport(String),
}

/// Transport-level failure raised by a submission backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SubmitTransportError(pub String);

impl From<SubmitTransportError> for SubmitError {
    fn from(err: SubmitTransportError) -> Self {
        SubmitError::Transport(err.0)
    }
}

/// Classified failure of an AI suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("The suggestion service has no API key configured.")]
    MissingCredential,
    #[error("The suggestion service rejected the API key.")]
    InvalidCredential,
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,
    #[error("The suggestion service is temporarily unavailable. Please try again later.")]
    Unavailable,
    #[error("The suggestion request timed out.")]
    Timeout,
    #[error("No suggestion was received. Please try again.")]
    EmptyResult,
    #[error("Failed to generate suggestion: {0}")]
    Generic(String),
    #[error("Field `{0}` does not support suggestions.")]
    Unsupported(FieldName),
}

impl SuggestionError {
    /// Quota and credential failures are answered with canned text instead
    /// of an error popup.
    pub fn uses_fallback(&self) -> bool {
        matches!(
            self,
            SuggestionError::RateLimited
                | SuggestionError::MissingCredential
                | SuggestionError::InvalidCredential
        )
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            SuggestionError::MissingCredential => "ai.errors.missingKey",
            SuggestionError::InvalidCredential => "ai.errors.invalidKey",
            SuggestionError::RateLimited => "ai.errors.rateLimited",
            SuggestionError::Unavailable => "ai.errors.unavailable",
            SuggestionError::Timeout => "ai.errors.timeout",
            SuggestionError::EmptyResult => "ai.errors.noSuggestion",
            SuggestionError::Generic(_) => "ai.errors.general",
            SuggestionError::Unsupported(_) => "ai.errors.unsupported",
        }
    }
}

/// Error type for the interactive shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Session(SessionError::Core(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Session(SessionError::Config(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
