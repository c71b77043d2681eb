use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

const DEFAULT_DIR_NAME: &str = ".assist_form";
const AUTOSAVE_DIR: &str = "autosave";

/// User-configurable preferences for the application form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default)]
    pub autosave: AutosaveSettings,
    #[serde(default)]
    pub suggestions: SuggestionSettings,
    #[serde(default)]
    pub submission: SubmissionSettings,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional directory for autosave slots. Defaults to `<home>/autosave`.
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            autosave: AutosaveSettings::default(),
            suggestions: SuggestionSettings::default(),
            submission: SubmissionSettings::default(),
            storage_dir: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en".into()
    }

    /// Application home: `$ASSIST_FORM_HOME`, else `~/.assist_form`.
    pub fn home_dir() -> PathBuf {
        if let Some(custom) = std::env::var_os("ASSIST_FORM_HOME") {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_storage_dir(&self, home: &std::path::Path) -> PathBuf {
        match &self.storage_dir {
            Some(path) => path.clone(),
            None => home.join(AUTOSAVE_DIR),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveSettings {
    #[serde(default = "AutosaveSettings::default_debounce_ms")]
    pub debounce_ms: u64,
}

impl AutosaveSettings {
    pub fn default_debounce_ms() -> u64 {
        500
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSettings {
    /// Deadline for one suggestion request; `0` disables it.
    #[serde(default = "SuggestionSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause before a canned suggestion is shown in place of a failed request.
    #[serde(default = "SuggestionSettings::default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
}

impl SuggestionSettings {
    pub fn default_timeout_secs() -> u64 {
        30
    }

    pub fn default_fallback_delay_ms() -> u64 {
        1000
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            fallback_delay_ms: Self::default_fallback_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSettings {
    /// Artificial latency of the bundled mock backend.
    #[serde(default = "SubmissionSettings::default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl SubmissionSettings {
    pub fn default_simulated_latency_ms() -> u64 {
        2000
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: Self::default_simulated_latency_ms(),
        }
    }
}
