use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use assist_core::{CoreError, SlotStorage};

/// In-process [`SlotStorage`] that counts writes per slot.
///
/// Backs ephemeral sessions and lets tests observe how often the gateway
/// actually writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    writes: Mutex<HashMap<String, usize>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates slots without counting them as writes.
    pub fn with_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let storage = Self::default();
        storage.lock_slots().extend(slots);
        storage
    }

    /// Makes every subsequent write fail, as a full disk or quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.lock_writes().values().sum()
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.lock_writes().get(key).copied().unwrap_or(0)
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.lock_slots().get(key).cloned()
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writes(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStorage for MemoryStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.lock_slots().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("storage quota exceeded".into()));
        }
        self.lock_slots().insert(key.to_string(), value.to_string());
        *self.lock_writes().entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<(), CoreError> {
        self.lock_slots().remove(key);
        Ok(())
    }

    fn has_slot(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.lock_slots().contains_key(key))
    }
}
