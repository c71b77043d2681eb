use assist_domain::{FormRecord, StepIndex};

use crate::store::FieldErrors;

/// Signature of a step completeness predicate, injectable into navigation.
pub type CompletenessCheck = fn(StepIndex, &FormRecord, &FieldErrors) -> bool;

/// A step is complete when each of its fields is filled and error-free.
pub fn is_step_complete(step: StepIndex, record: &FormRecord, errors: &FieldErrors) -> bool {
    step.fields()
        .iter()
        .all(|field| record.is_filled(*field) && !errors.contains(*field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldError;
    use crate::validation::ValidationIssue;
    use assist_domain::{FieldName, STEP_1_FIELDS};

    fn filled_step_one() -> FormRecord {
        let mut record = FormRecord::new();
        record.set(FieldName::Name, "Jane Doe");
        record.set(FieldName::NationalId, "A1B2C3D4");
        record.set(FieldName::DateOfBirth, "1990-04-12");
        record.set(FieldName::Gender, "female");
        record.set(FieldName::Address, "12 Palm Street");
        record.set(FieldName::City, "Amman");
        record.set(FieldName::State, "Amman");
        record.set(FieldName::Country, "Jordan");
        record.set(FieldName::Phone, "+962791234567");
        record.set(FieldName::Email, "jane@example.org");
        record
    }

    #[test]
    fn step_one_complete_when_all_ten_fields_filled() {
        let record = filled_step_one();
        assert!(is_step_complete(StepIndex::FIRST, &record, &FieldErrors::default()));
        assert!(!is_step_complete(StepIndex::SECOND, &record, &FieldErrors::default()));
    }

    #[test]
    fn emptying_any_field_flips_completeness() {
        for field in STEP_1_FIELDS {
            let mut record = filled_step_one();
            record.set(field, " ");
            assert!(
                !is_step_complete(StepIndex::FIRST, &record, &FieldErrors::default()),
                "{field} blank should block step 1"
            );
        }
    }

    #[test]
    fn active_error_blocks_completeness() {
        let record = filled_step_one();
        let mut errors = FieldErrors::default();
        errors.insert(
            FieldName::Email,
            FieldError::new(ValidationIssue::EmailInvalid, "bad email"),
        );
        assert!(!is_step_complete(StepIndex::FIRST, &record, &errors));
    }

    #[test]
    fn errors_on_other_steps_do_not_matter() {
        let record = filled_step_one();
        let mut errors = FieldErrors::default();
        errors.insert(
            FieldName::Dependents,
            FieldError::new(ValidationIssue::Required, "required"),
        );
        assert!(is_step_complete(StepIndex::FIRST, &record, &errors));
        assert!(!is_step_complete(StepIndex::SECOND, &record, &errors));
    }
}
