//! Closed set of form fields and their step membership.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::step::StepIndex;

/// Every field collected by the application form, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    // Step 1: personal information
    Name,
    NationalId,
    DateOfBirth,
    Gender,
    Address,
    City,
    State,
    Country,
    Phone,
    Email,
    // Step 2: family & financial information
    MaritalStatus,
    Dependents,
    EmploymentStatus,
    MonthlyIncome,
    HousingStatus,
    // Step 3: situation descriptions
    FinancialSituation,
    EmploymentCircumstances,
    ReasonForApplying,
}

pub const STEP_1_FIELDS: [FieldName; 10] = [
    FieldName::Name,
    FieldName::NationalId,
    FieldName::DateOfBirth,
    FieldName::Gender,
    FieldName::Address,
    FieldName::City,
    FieldName::State,
    FieldName::Country,
    FieldName::Phone,
    FieldName::Email,
];

pub const STEP_2_FIELDS: [FieldName; 5] = [
    FieldName::MaritalStatus,
    FieldName::Dependents,
    FieldName::EmploymentStatus,
    FieldName::MonthlyIncome,
    FieldName::HousingStatus,
];

pub const STEP_3_FIELDS: [FieldName; 3] = [
    FieldName::FinancialSituation,
    FieldName::EmploymentCircumstances,
    FieldName::ReasonForApplying,
];

impl FieldName {
    pub const ALL: [FieldName; 18] = [
        FieldName::Name,
        FieldName::NationalId,
        FieldName::DateOfBirth,
        FieldName::Gender,
        FieldName::Address,
        FieldName::City,
        FieldName::State,
        FieldName::Country,
        FieldName::Phone,
        FieldName::Email,
        FieldName::MaritalStatus,
        FieldName::Dependents,
        FieldName::EmploymentStatus,
        FieldName::MonthlyIncome,
        FieldName::HousingStatus,
        FieldName::FinancialSituation,
        FieldName::EmploymentCircumstances,
        FieldName::ReasonForApplying,
    ];

    /// Storage key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::NationalId => "nationalId",
            FieldName::DateOfBirth => "dateOfBirth",
            FieldName::Gender => "gender",
            FieldName::Address => "address",
            FieldName::City => "city",
            FieldName::State => "state",
            FieldName::Country => "country",
            FieldName::Phone => "phone",
            FieldName::Email => "email",
            FieldName::MaritalStatus => "maritalStatus",
            FieldName::Dependents => "dependents",
            FieldName::EmploymentStatus => "employmentStatus",
            FieldName::MonthlyIncome => "monthlyIncome",
            FieldName::HousingStatus => "housingStatus",
            FieldName::FinancialSituation => "financialSituation",
            FieldName::EmploymentCircumstances => "employmentCircumstances",
            FieldName::ReasonForApplying => "reasonForApplying",
        }
    }

    /// Localization key of the field label (`fields.<key>`).
    pub fn label_key(self) -> String {
        format!("fields.{}", self.key())
    }

    pub fn step(self) -> StepIndex {
        if STEP_1_FIELDS.contains(&self) {
            StepIndex::FIRST
        } else if STEP_2_FIELDS.contains(&self) {
            StepIndex::SECOND
        } else {
            StepIndex::LAST
        }
    }

    /// Every field is mandatory before its step can be left.
    pub fn is_required(self) -> bool {
        true
    }

    /// Narrative fields may be drafted by the suggestion service.
    pub fn supports_suggestion(self) -> bool {
        STEP_3_FIELDS.contains(&self)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let needle = normalize(key);
        Self::ALL
            .iter()
            .copied()
            .find(|field| normalize(field.key()) == needle)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| !matches!(ch, '_' | '-'))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when text does not name a known form field.
pub struct UnknownFieldError(pub String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field `{}`", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for FieldName {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::from_key(s).ok_or_else(|| UnknownFieldError(s.trim().to_string()))
    }
}
