use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{FieldName, STEP_1_FIELDS, STEP_2_FIELDS, STEP_3_FIELDS};

/// One of the three ordered form steps (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StepIndex(u8);

impl StepIndex {
    pub const FIRST: StepIndex = StepIndex(1);
    pub const SECOND: StepIndex = StepIndex(2);
    pub const LAST: StepIndex = StepIndex(3);
    pub const COUNT: u8 = 3;

    pub fn new(value: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Following step, or `None` at the last one.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Preceding step, or `None` at the first one.
    pub fn previous(self) -> Option<Self> {
        self.0.checked_sub(1).and_then(Self::new)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Fixed field list of this step, in presentation order.
    pub fn fields(self) -> &'static [FieldName] {
        match self.0 {
            1 => &STEP_1_FIELDS,
            2 => &STEP_2_FIELDS,
            _ => &STEP_3_FIELDS,
        }
    }

    /// Localization key of the step title (`steps.stepN`).
    pub fn title_key(self) -> String {
        format!("steps.step{}", self.0)
    }

    pub fn all() -> [StepIndex; 3] {
        [Self::FIRST, Self::SECOND, Self::LAST]
    }
}

impl Default for StepIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Raised when a number falls outside the `1..=3` step range.
pub struct StepOutOfRange(pub u8);

impl fmt::Display for StepOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {} is out of range 1..={}",
            self.0,
            StepIndex::COUNT
        )
    }
}

impl std::error::Error for StepOutOfRange {}

impl TryFrom<u8> for StepIndex {
    type Error = StepOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StepIndex::new(value).ok_or(StepOutOfRange(value))
    }
}

impl From<StepIndex> for u8 {
    fn from(step: StepIndex) -> Self {
        step.0
    }
}
