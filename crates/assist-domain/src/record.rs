//! Field values of one application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldName;

/// Current value of every form field.
///
/// The key set is fixed: every [`FieldName`] always has an entry, empty
/// strings standing in for "not answered yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<FieldName, String>",
    from = "BTreeMap<FieldName, String>"
)]
pub struct FormRecord {
    values: BTreeMap<FieldName, String>,
}

impl FormRecord {
    /// All-empty defaults.
    pub fn new() -> Self {
        Self {
            values: FieldName::ALL
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    /// Lays `saved` over the defaults: saved values win, defaults fill gaps.
    pub fn merged_over_defaults<I>(saved: I) -> Self
    where
        I: IntoIterator<Item = (FieldName, String)>,
    {
        let mut record = Self::new();
        for (field, value) in saved {
            record.values.insert(field, value);
        }
        record
    }

    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// True when the value is non-empty after trimming.
    pub fn is_filled(&self, field: FieldName) -> bool {
        !self.get(field).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }
}

impl Default for FormRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<FieldName, String>> for FormRecord {
    fn from(values: BTreeMap<FieldName, String>) -> Self {
        FormRecord::merged_over_defaults(values)
    }
}

impl From<FormRecord> for BTreeMap<FieldName, String> {
    fn from(record: FormRecord) -> Self {
        record.values
    }
}
