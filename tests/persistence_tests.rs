mod common;

use std::{sync::Arc, time::Duration};

use assist_form::{
    domain::{FieldName, FormRecord, StepIndex},
    persistence::{MemoryStorage, PersistenceGateway, FORM_SLOT, STEP_SLOT},
};
use serde_json::Value;

use common::{fresh_session, DEBOUNCE};

fn armed_gateway() -> (PersistenceGateway, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let mut gateway = PersistenceGateway::new(storage.clone(), DEBOUNCE);
    gateway.arm();
    (gateway, storage)
}

fn saved_value(storage: &MemoryStorage, key: &str) -> Option<String> {
    let raw = storage.snapshot(FORM_SLOT)?;
    let object: Value = serde_json::from_str(&raw).ok()?;
    object.get(key)?.as_str().map(str::to_string)
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_collapses_into_one_write_of_the_latest_data() {
    let (mut session, storage) = fresh_session();

    for value in ["J", "Ja", "Jan", "Jane"] {
        session.set_field(FieldName::Name, value).expect("write");
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(storage.writes_to(FORM_SLOT), 0);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(storage.writes_to(FORM_SLOT), 1);
    assert_eq!(saved_value(&storage, "name").as_deref(), Some("Jane"));
    assert_eq!(storage.snapshot(STEP_SLOT).as_deref(), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn edits_separated_by_a_quiet_period_write_twice() {
    let (mut session, storage) = fresh_session();

    session.set_field(FieldName::City, "Dubai").expect("write");
    tokio::time::sleep(Duration::from_millis(700)).await;
    session.set_field(FieldName::City, "Sharjah").expect("write");
    tokio::time::sleep(Duration::from_millis(700)).await;

    assert_eq!(storage.writes_to(FORM_SLOT), 2);
    assert_eq!(saved_value(&storage, "city").as_deref(), Some("Sharjah"));
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_a_pending_save() {
    let (mut gateway, storage) = armed_gateway();
    let mut record = FormRecord::new();
    record.set(FieldName::Name, "Jane Doe");

    gateway.schedule_save(&record, StepIndex::FIRST);
    assert!(gateway.has_pending_save());
    gateway.clear();
    assert!(!gateway.has_pending_save());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(storage.write_count(), 0);
    assert!(!gateway.exists());
}

#[tokio::test(start_paused = true)]
async fn disarmed_gateway_never_writes() {
    let storage = Arc::new(MemoryStorage::new());
    let mut gateway = PersistenceGateway::new(storage.clone(), DEBOUNCE);

    gateway.schedule_save(&FormRecord::new(), StepIndex::SECOND);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(!gateway.is_armed());
    assert_eq!(storage.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn flush_writes_the_pending_save_immediately() {
    let (mut gateway, storage) = armed_gateway();
    let mut record = FormRecord::new();
    record.set(FieldName::Email, "jane@example.com");

    gateway.schedule_save(&record, StepIndex::SECOND);
    assert!(gateway.flush());
    assert_eq!(storage.writes_to(FORM_SLOT), 1);
    assert_eq!(storage.snapshot(STEP_SLOT).as_deref(), Some("2"));

    // The aborted timer must not write a second time.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(storage.writes_to(FORM_SLOT), 1);
    assert!(!gateway.flush());
}

#[tokio::test(start_paused = true)]
async fn write_failures_are_swallowed() {
    let (mut session, storage) = fresh_session();
    storage.set_fail_writes(true);

    let update = session
        .set_field(FieldName::Name, "Jane Doe")
        .expect("write still succeeds in memory");
    assert!(update.error.is_none());
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(storage.write_count(), 0);
    assert_eq!(session.record().get(FieldName::Name), "Jane Doe");
}

#[tokio::test(start_paused = true)]
async fn saved_snapshot_loads_back_with_its_step() {
    let (mut session, storage) = fresh_session();
    common::fill_step(&mut session, StepIndex::FIRST);
    session.next_step().expect("advance");
    tokio::time::sleep(Duration::from_secs(1)).await;

    let gateway = PersistenceGateway::new(storage.clone(), DEBOUNCE);
    let snapshot = gateway.load().expect("snapshot");
    assert_eq!(snapshot.step, StepIndex::SECOND);
    assert_eq!(snapshot.record.get(FieldName::Email), "jane@example.com");
    assert!(snapshot.saved_at.is_some());
}

#[test]
fn saves_outside_a_runtime_happen_immediately() {
    let (mut gateway, storage) = armed_gateway();
    gateway.schedule_save(&FormRecord::new(), StepIndex::LAST);

    assert_eq!(storage.writes_to(FORM_SLOT), 1);
    assert_eq!(storage.snapshot(STEP_SLOT).as_deref(), Some("3"));
    assert!(!gateway.has_pending_save());
}

#[test]
fn corrupt_snapshot_reads_as_absent() {
    let storage = Arc::new(MemoryStorage::with_slots([(
        FORM_SLOT.to_string(),
        "{not json".to_string(),
    )]));
    let gateway = PersistenceGateway::new(storage, DEBOUNCE);
    assert!(gateway.load().is_none());
    assert!(gateway.exists());
}
