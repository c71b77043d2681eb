//! Best-effort local auto-save of the in-progress application.
//!
//! Two slots are used: [`FORM_SLOT`] holds a JSON object with every field
//! plus a `savedAt` timestamp, [`STEP_SLOT`] holds the current step as a
//! decimal string. Storage failures are logged and swallowed.

mod memory;

pub use memory::MemoryStorage;

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use assist_core::SlotStorage;
use assist_domain::{FieldName, FormRecord, StepIndex};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

pub const FORM_SLOT: &str = "financial_assistance_form";
pub const STEP_SLOT: &str = "financial_assistance_form_step";
pub const SAVED_AT_KEY: &str = "savedAt";

/// What [`PersistenceGateway::load`] recovers from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub record: FormRecord,
    pub step: StepIndex,
    pub saved_at: Option<DateTime<Utc>>,
}

type Payload = (FormRecord, StepIndex);

struct PendingSave {
    handle: JoinHandle<()>,
    payload: Arc<Mutex<Option<Payload>>>,
}

/// Debounced writer over a [`SlotStorage`].
///
/// Saves are ignored until [`arm`](Self::arm) is called, so a snapshot that
/// has not yet been offered for restore is never overwritten.
pub struct PersistenceGateway {
    storage: Arc<dyn SlotStorage>,
    debounce: Duration,
    armed: bool,
    pending: Option<PendingSave>,
}

impl PersistenceGateway {
    pub fn new(storage: Arc<dyn SlotStorage>, debounce: Duration) -> Self {
        Self {
            storage,
            debounce,
            armed: false,
            pending: None,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// True while a debounced save is waiting for its quiet period.
    pub fn has_pending_save(&self) -> bool {
        self.pending
            .as_ref()
            .map(|pending| lock(&pending.payload).is_some())
            .unwrap_or(false)
    }

    /// Trailing-edge debounce: every call restarts the timer and replaces the
    /// payload, so a burst of edits ends in one write of the latest data.
    pub fn schedule_save(&mut self, record: &FormRecord, step: StepIndex) {
        if !self.armed {
            debug!("auto-save not armed, skipping save");
            return;
        }
        self.cancel_pending();

        let Ok(runtime) = Handle::try_current() else {
            debug!("no async runtime available, saving immediately");
            self.save_now(record, step);
            return;
        };

        let payload = Arc::new(Mutex::new(Some((record.clone(), step))));
        let storage = Arc::clone(&self.storage);
        let delay = self.debounce;
        let task_payload = Arc::clone(&payload);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let taken = lock(&task_payload).take();
            if let Some((record, step)) = taken {
                write_snapshot(storage.as_ref(), &record, step);
            }
        });
        self.pending = Some(PendingSave { handle, payload });
    }

    /// Writes immediately, bypassing the debounce timer.
    pub fn save_now(&self, record: &FormRecord, step: StepIndex) {
        write_snapshot(self.storage.as_ref(), record, step);
    }

    /// Writes a pending debounced save right away. Returns whether anything
    /// was written.
    pub fn flush(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        pending.handle.abort();
        let taken = lock(&pending.payload).take();
        match taken {
            Some((record, step)) => {
                write_snapshot(self.storage.as_ref(), &record, step);
                true
            }
            None => false,
        }
    }

    /// Reads the saved snapshot. Missing or unreadable data yields `None`.
    pub fn load(&self) -> Option<PersistedSnapshot> {
        let raw = match self.storage.read_slot(FORM_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read saved form");
                return None;
            }
        };
        let object = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                warn!("saved form is not a JSON object, ignoring it");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "saved form is not valid JSON, ignoring it");
                return None;
            }
        };

        let (record, saved_at) = decode_record(object);
        let step = self.load_step();
        debug!(step = %step, "loaded saved form");
        Some(PersistedSnapshot {
            record,
            step,
            saved_at,
        })
    }

    /// Cancels any pending save and removes both slots.
    pub fn clear(&mut self) {
        self.cancel_pending();
        for slot in [FORM_SLOT, STEP_SLOT] {
            if let Err(err) = self.storage.remove_slot(slot) {
                warn!(slot, error = %err, "failed to remove saved slot");
            }
        }
        debug!("cleared saved form");
    }

    pub fn exists(&self) -> bool {
        match self.storage.has_slot(FORM_SLOT) {
            Ok(present) => present,
            Err(err) => {
                warn!(error = %err, "failed to probe saved form");
                false
            }
        }
    }

    fn load_step(&self) -> StepIndex {
        match self.storage.read_slot(STEP_SLOT) {
            Ok(Some(raw)) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(StepIndex::new)
                .unwrap_or_default(),
            Ok(None) => StepIndex::default(),
            Err(err) => {
                warn!(error = %err, "failed to read saved step");
                StepIndex::default()
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            lock(&pending.payload).take();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn encode_record(record: &FormRecord, saved_at: DateTime<Utc>) -> String {
    let mut object: Map<String, Value> = record
        .iter()
        .map(|(field, value)| (field.key().to_string(), Value::String(value.to_string())))
        .collect();
    object.insert(
        SAVED_AT_KEY.to_string(),
        Value::String(saved_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    Value::Object(object).to_string()
}

fn decode_record(object: Map<String, Value>) -> (FormRecord, Option<DateTime<Utc>>) {
    let mut saved_at = None;
    let mut values = Vec::new();
    for (key, value) in object {
        if key == SAVED_AT_KEY {
            saved_at = value
                .as_str()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|stamp| stamp.with_timezone(&Utc));
            continue;
        }
        let Some(field) = FieldName::ALL.iter().copied().find(|f| f.key() == key) else {
            debug!(key = %key, "dropping unknown saved key");
            continue;
        };
        let text = match value {
            Value::String(text) => text,
            Value::Null => continue,
            other => other.to_string(),
        };
        values.push((field, text));
    }
    (FormRecord::merged_over_defaults(values), saved_at)
}

fn write_snapshot(storage: &dyn SlotStorage, record: &FormRecord, step: StepIndex) {
    let blob = encode_record(record, Utc::now());
    if let Err(err) = storage.write_slot(FORM_SLOT, &blob) {
        warn!(error = %err, "auto-save failed");
        return;
    }
    if let Err(err) = storage.write_slot(STEP_SLOT, &step.get().to_string()) {
        warn!(error = %err, "auto-save of the current step failed");
        return;
    }
    debug!(step = %step, "form saved");
}
