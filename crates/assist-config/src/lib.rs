//! assist-config
//!
//! Persistent application preferences (locale, autosave, suggestion and
//! submission timings) plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AutosaveSettings, Config, SubmissionSettings, SuggestionSettings};
