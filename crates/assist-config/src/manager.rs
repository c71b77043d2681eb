//! On-disk home for the form preferences.
//!
//! The shell keeps a single `config.json` under `<home>/config`, where
//! `<home>` is [`Config::home_dir`]. It carries the UI `locale`, the
//! auto-save `debounce_ms`, the suggestion `timeout_secs` and
//! `fallback_delay_ms`, the mock `simulated_latency_ms`, and an optional
//! `storage_dir` override for the auto-save slots. Keys missing from the
//! file take their defaults, so a hand-written partial file is enough to
//! tune a single timing.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const TMP_SUFFIX: &str = "tmp";

/// Reads and writes the preferences file. Only the `locale` command writes
/// it back; everything else is read once when the shell starts.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Points at `<base>/config/config.json`, creating the directory if
    /// needed. `base` is normally the application home.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("config.json")))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns defaults (English, 500 ms auto-save, 30 s suggestion
    /// deadline) when no file exists yet. A file that is not valid JSON is a
    /// [`ConfigError::Serde`] rather than a silent reset.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the whole file through a sibling `.json.tmp` and a rename, so
    /// an interrupted save leaves the previous preferences readable.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
