//! Per-field validation rules.
//!
//! Rules run on every keystroke, so the format checks treat an empty value as
//! provisionally valid. [`validate`] adds the required check in front of
//! them.

use std::fmt;

use assist_domain::FieldName;
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name pattern"));
static NATIONAL_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z]{8}$").expect("valid national id pattern"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]+$").expect("valid phone pattern"));
static PHONE_FORBIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z\s\-().,;:!@#$%^&*]").expect("valid phone rejection pattern")
});

pub const NATIONAL_ID_LENGTH: usize = 8;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Reason a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    Required,
    NameInvalid,
    NationalIdTooShort,
    NationalIdTooLong,
    NationalIdInvalid,
    EmailInvalid,
    PhoneOnlyNumbers,
    PhoneTooShort,
    PhoneTooLong,
}

impl ValidationIssue {
    /// Message catalog key for this issue.
    pub fn message_key(self) -> &'static str {
        match self {
            ValidationIssue::Required => "validation.required",
            ValidationIssue::NameInvalid => "validation.nameInvalid",
            ValidationIssue::NationalIdTooShort => "validation.nationalIdTooShort",
            ValidationIssue::NationalIdTooLong => "validation.nationalIdTooLong",
            ValidationIssue::NationalIdInvalid => "validation.nationalIdInvalid",
            ValidationIssue::EmailInvalid => "validation.email",
            ValidationIssue::PhoneOnlyNumbers => "validation.phoneOnlyNumbers",
            ValidationIssue::PhoneTooShort => "validation.phoneTooShort",
            ValidationIssue::PhoneTooLong => "validation.phoneTooLong",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationIssue::Required => "This field is required",
            ValidationIssue::NameInvalid => "Name may only contain letters and spaces",
            ValidationIssue::NationalIdTooShort => "National ID is too short (8 characters)",
            ValidationIssue::NationalIdTooLong => "National ID is too long (8 characters)",
            ValidationIssue::NationalIdInvalid => {
                "National ID is invalid: use letters and digits only"
            }
            ValidationIssue::EmailInvalid => "Enter a valid email address",
            ValidationIssue::PhoneOnlyNumbers => "Phone number may contain numbers only",
            ValidationIssue::PhoneTooShort => "Phone number is too short (at least 10 digits)",
            ValidationIssue::PhoneTooLong => "Phone number is too long (at most 15 digits)",
        };
        f.write_str(text)
    }
}

/// Format rules only; empty input passes.
pub fn validate_format(field: FieldName, raw: &str) -> Result<(), ValidationIssue> {
    match field {
        FieldName::Name => validate_name(raw),
        FieldName::NationalId => validate_national_id(raw),
        FieldName::Email => validate_email(raw),
        FieldName::Phone => validate_phone(raw),
        _ => Ok(()),
    }
}

/// Required check followed by the format rules.
pub fn validate(field: FieldName, raw: &str) -> Result<(), ValidationIssue> {
    if field.is_required() && raw.trim().is_empty() {
        return Err(ValidationIssue::Required);
    }
    validate_format(field, raw)
}

fn validate_name(raw: &str) -> Result<(), ValidationIssue> {
    if raw.is_empty() || NAME_PATTERN.is_match(raw) {
        Ok(())
    } else {
        Err(ValidationIssue::NameInvalid)
    }
}

fn validate_national_id(raw: &str) -> Result<(), ValidationIssue> {
    if raw.is_empty() {
        return Ok(());
    }
    let length = raw.chars().count();
    if length < NATIONAL_ID_LENGTH {
        Err(ValidationIssue::NationalIdTooShort)
    } else if length > NATIONAL_ID_LENGTH {
        Err(ValidationIssue::NationalIdTooLong)
    } else if !NATIONAL_ID_PATTERN.is_match(raw) {
        Err(ValidationIssue::NationalIdInvalid)
    } else {
        Ok(())
    }
}

fn validate_email(raw: &str) -> Result<(), ValidationIssue> {
    if raw.is_empty() || EMAIL_PATTERN.is_match(raw) {
        Ok(())
    } else {
        Err(ValidationIssue::EmailInvalid)
    }
}

fn validate_phone(raw: &str) -> Result<(), ValidationIssue> {
    if raw.is_empty() {
        return Ok(());
    }
    // Character class violations win over length violations.
    if PHONE_FORBIDDEN.is_match(raw) || !PHONE_PATTERN.is_match(raw) {
        return Err(ValidationIssue::PhoneOnlyNumbers);
    }
    let digits = raw.strip_prefix('+').unwrap_or(raw).len();
    if digits < PHONE_MIN_DIGITS {
        Err(ValidationIssue::PhoneTooShort)
    } else if digits > PHONE_MAX_DIGITS {
        Err(ValidationIssue::PhoneTooLong)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_letters_and_spaces_only() {
        assert_eq!(validate_format(FieldName::Name, ""), Ok(()));
        assert_eq!(validate_format(FieldName::Name, "Jane Doe"), Ok(()));
        assert_eq!(
            validate_format(FieldName::Name, "Jane D0e"),
            Err(ValidationIssue::NameInvalid)
        );
        assert_eq!(
            validate_format(FieldName::Name, "O'Brien"),
            Err(ValidationIssue::NameInvalid)
        );
    }

    #[test]
    fn national_id_length_and_charset() {
        assert_eq!(validate_format(FieldName::NationalId, ""), Ok(()));
        assert_eq!(
            validate_format(FieldName::NationalId, "1234567"),
            Err(ValidationIssue::NationalIdTooShort)
        );
        assert_eq!(
            validate_format(FieldName::NationalId, "123456789"),
            Err(ValidationIssue::NationalIdTooLong)
        );
        assert_eq!(
            validate_format(FieldName::NationalId, "1234567!"),
            Err(ValidationIssue::NationalIdInvalid)
        );
        assert_eq!(validate_format(FieldName::NationalId, "A1B2C3D4"), Ok(()));
    }

    #[test]
    fn national_id_short_symbol_input_reports_length_first() {
        assert_eq!(
            validate_format(FieldName::NationalId, "12-4"),
            Err(ValidationIssue::NationalIdTooShort)
        );
    }

    #[test]
    fn email_format() {
        assert_eq!(validate_format(FieldName::Email, "jane.doe+aid@example.org"), Ok(()));
        assert_eq!(
            validate_format(FieldName::Email, "jane@example"),
            Err(ValidationIssue::EmailInvalid)
        );
        assert_eq!(
            validate_format(FieldName::Email, "jane@example.c"),
            Err(ValidationIssue::EmailInvalid)
        );
    }

    #[test]
    fn phone_rules() {
        assert_eq!(validate_format(FieldName::Phone, ""), Ok(()));
        assert_eq!(
            validate_format(FieldName::Phone, "12345"),
            Err(ValidationIssue::PhoneTooShort)
        );
        assert_eq!(
            validate_format(FieldName::Phone, "+1234567890123456"),
            Err(ValidationIssue::PhoneTooLong)
        );
        assert_eq!(
            validate_format(FieldName::Phone, "+123456789a"),
            Err(ValidationIssue::PhoneOnlyNumbers)
        );
        assert_eq!(
            validate_format(FieldName::Phone, "050 123 4567"),
            Err(ValidationIssue::PhoneOnlyNumbers)
        );
        assert_eq!(
            validate_format(FieldName::Phone, "12+34567890"),
            Err(ValidationIssue::PhoneOnlyNumbers)
        );
        assert_eq!(validate_format(FieldName::Phone, "+971501234567"), Ok(()));
        assert_eq!(validate_format(FieldName::Phone, "0501234567"), Ok(()));
    }

    #[test]
    fn required_check_applies_only_in_full_validation() {
        assert_eq!(validate_format(FieldName::City, "   "), Ok(()));
        assert_eq!(validate(FieldName::City, "   "), Err(ValidationIssue::Required));
        assert_eq!(validate(FieldName::NationalId, ""), Err(ValidationIssue::Required));
        assert_eq!(validate(FieldName::City, "Amman"), Ok(()));
    }

    #[test]
    fn free_fields_have_no_format_constraint() {
        assert_eq!(validate(FieldName::MonthlyIncome, "not a number"), Ok(()));
        assert_eq!(validate(FieldName::DateOfBirth, "yesterday"), Ok(()));
    }

    #[test]
    fn validation_is_deterministic() {
        for field in FieldName::ALL {
            for value in ["", "abc", "A1B2C3D4", "+971501234567", "x@y.io"] {
                assert_eq!(validate(field, value), validate(field, value));
            }
        }
    }
}
