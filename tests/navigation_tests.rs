mod common;

use std::sync::Arc;

use assist_form::{
    core::ValidationIssue,
    domain::{FieldName, StepIndex},
    errors::SessionError,
    navigation::NavOutcome,
    persistence::{MemoryStorage, FORM_SLOT, STEP_SLOT},
    session::{ApplicationSession, RestoreChoice, StartupState},
};
use serde_json::json;

use common::{fill_step, fresh_session, valid_value, DEBOUNCE};

fn seeded_storage(step: &str) -> Arc<MemoryStorage> {
    let form = json!({
        "name": "Jane Doe",
        "email": "not-an-email",
        "city": "Dubai",
        "mobile": "0501234567",
        "savedAt": "2026-03-01T09:30:00.000Z",
    });
    Arc::new(MemoryStorage::with_slots([
        (FORM_SLOT.to_string(), form.to_string()),
        (STEP_SLOT.to_string(), step.to_string()),
    ]))
}

#[test]
fn fresh_start_arms_auto_save() {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = ApplicationSession::with_debounce(storage.clone(), DEBOUNCE);

    assert_eq!(session.start(), StartupState::Fresh);
    assert!(session.gateway().is_armed());
    assert!(!session.has_pending_restore());

    session.set_field(FieldName::Name, "Jane").expect("write");
    assert_eq!(storage.writes_to(FORM_SLOT), 1);
}

#[test]
fn saved_application_is_offered_and_left_untouched_until_answered() {
    let storage = seeded_storage("2");
    let mut session = ApplicationSession::with_debounce(storage.clone(), DEBOUNCE);

    let StartupState::RestoreOffered { saved_at, step } = session.start() else {
        panic!("expected a restore offer");
    };
    assert_eq!(step, StepIndex::SECOND);
    assert!(saved_at.is_some());
    assert!(session.has_pending_restore());
    assert!(!session.gateway().is_armed());

    session.set_field(FieldName::Name, "Someone Else").expect("write");
    assert_eq!(storage.write_count(), 0);
    assert!(storage
        .snapshot(FORM_SLOT)
        .expect("slot kept")
        .contains("Jane Doe"));
}

#[test]
fn restore_merges_defaults_and_flags_invalid_values_at_once() {
    let storage = seeded_storage("2");
    let mut session = ApplicationSession::with_debounce(storage, DEBOUNCE);
    session.start();

    let step = session
        .resolve_restore(RestoreChoice::Restore)
        .expect("restore");
    assert_eq!(step, StepIndex::SECOND);
    assert_eq!(session.current_step(), StepIndex::SECOND);
    assert_eq!(session.record().get(FieldName::Name), "Jane Doe");
    assert_eq!(session.record().get(FieldName::Phone), "");

    let email_error = session
        .store()
        .error_for(FieldName::Email)
        .expect("email flagged");
    assert_eq!(email_error.issue, ValidationIssue::EmailInvalid);
    assert!(session.gateway().is_armed());
    assert!(!session.has_pending_restore());
}

#[test]
fn discard_removes_both_slots_and_starts_on_step_one() {
    let storage = seeded_storage("3");
    let mut session = ApplicationSession::with_debounce(storage.clone(), DEBOUNCE);
    session.start();

    let step = session
        .resolve_restore(RestoreChoice::Discard)
        .expect("discard");
    assert_eq!(step, StepIndex::FIRST);
    assert!(storage.snapshot(FORM_SLOT).is_none());
    assert!(storage.snapshot(STEP_SLOT).is_none());
    assert_eq!(session.record().get(FieldName::Name), "");
    assert!(session.gateway().is_armed());
}

#[test]
fn unreadable_step_slot_restores_to_step_one() {
    let storage = seeded_storage("nine");
    let mut session = ApplicationSession::with_debounce(storage, DEBOUNCE);
    let StartupState::RestoreOffered { step, .. } = session.start() else {
        panic!("expected a restore offer");
    };
    assert_eq!(step, StepIndex::FIRST);
}

#[test]
fn resolving_without_an_offer_is_an_error() {
    let (mut session, _storage) = fresh_session();
    assert!(matches!(
        session.resolve_restore(RestoreChoice::Restore),
        Err(SessionError::NoPendingRestore)
    ));
}

#[test]
fn advance_is_blocked_until_the_step_is_complete() {
    let (mut session, _storage) = fresh_session();

    let outcome = session.next_step().expect("navigate");
    assert_eq!(outcome, NavOutcome::Blocked { step: StepIndex::FIRST });
    assert_eq!(session.current_step(), StepIndex::FIRST);
    assert_eq!(
        session
            .store()
            .error_for(FieldName::Name)
            .map(|error| error.issue),
        Some(ValidationIssue::Required)
    );

    fill_step(&mut session, StepIndex::FIRST);
    assert!(session.is_current_step_complete());
    assert_eq!(
        session.next_step().expect("navigate"),
        NavOutcome::Moved {
            from: StepIndex::FIRST,
            to: StepIndex::SECOND
        }
    );
}

#[test]
fn field_update_reports_step_completeness() {
    let (mut session, _storage) = fresh_session();
    let fields = StepIndex::SECOND.fields();
    let (last, rest) = fields.split_last().expect("step two has fields");

    for field in rest {
        let update = session.set_field(*field, valid_value(*field)).expect("write");
        assert!(!update.step_complete);
    }
    let update = session.set_field(*last, valid_value(*last)).expect("write");
    assert!(update.step_complete);

    let update = session.set_field(*last, "").expect("write");
    assert!(!update.step_complete);
    assert_eq!(
        update.error.map(|error| error.issue),
        Some(ValidationIssue::Required)
    );
}

#[test]
fn invalid_value_keeps_the_step_incomplete() {
    let (mut session, _storage) = fresh_session();
    fill_step(&mut session, StepIndex::FIRST);

    let update = session.set_field(FieldName::Phone, "12345").expect("write");
    assert_eq!(
        update.error.map(|error| error.issue),
        Some(ValidationIssue::PhoneTooShort)
    );
    assert!(!update.step_complete);
    assert!(!session.next_step().expect("navigate").moved());
}

#[test]
fn boundaries_do_not_move() {
    let (mut session, _storage) = fresh_session();
    assert_eq!(
        session.previous_step().expect("navigate"),
        NavOutcome::AtBoundary { step: StepIndex::FIRST }
    );

    common::complete_form(&mut session);
    assert_eq!(session.current_step(), StepIndex::LAST);
    assert_eq!(
        session.next_step().expect("navigate"),
        NavOutcome::AtBoundary { step: StepIndex::LAST }
    );
}

#[test]
fn going_back_never_validates() {
    let (mut session, _storage) = fresh_session();
    fill_step(&mut session, StepIndex::FIRST);
    session.next_step().expect("navigate");

    let outcome = session.previous_step().expect("navigate");
    assert!(outcome.moved());
    assert_eq!(session.current_step(), StepIndex::FIRST);
    assert!(session.store().error_for(FieldName::MaritalStatus).is_none());
}
