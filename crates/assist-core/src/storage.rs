use crate::CoreError;

/// Durable string-keyed slots, the local-storage model the form persists into.
pub trait SlotStorage: Send + Sync {
    fn read_slot(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn write_slot(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Removing an absent slot is not an error.
    fn remove_slot(&self, key: &str) -> Result<(), CoreError>;

    fn has_slot(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.read_slot(key)?.is_some())
    }
}
