//! assist-storage-json
//!
//! Filesystem-backed [`SlotStorage`]: every slot is one file under a
//! directory, replaced atomically on write.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use assist_core::{CoreError, SlotStorage};

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each slot as `<dir>/<canonical key>.json`.
#[derive(Debug)]
pub struct JsonSlotStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSlotStorage {
    pub fn new(dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", canonical_name(key), SLOT_EXTENSION))
    }

    /// Canonical names of every slot currently on disk, sorted.
    pub fn list_slots(&self) -> Result<Vec<String>, CoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("slot storage lock poisoned".into()))
    }
}

impl SlotStorage for JsonSlotStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let _guard = self.lock()?;
        let path = self.slot_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<(), CoreError> {
        let _guard = self.lock()?;
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn has_slot(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.slot_path(key).is_file())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "slot".into()
    } else {
        sanitized
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

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
